use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tracing::{info, warn};

use seatbot_core::{config::Config, messaging::port::ReplyPort, roster::RosterLookup};

use crate::handlers;
use crate::signature::{verify_signature, SIGNATURE_HEADER};
use crate::webhook::WebhookPayload;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub lookup: Arc<RosterLookup>,
    pub messenger: Arc<dyn ReplyPort>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/callback", post(callback))
        .with_state(state)
}

pub async fn run_server(
    cfg: Arc<Config>,
    lookup: Arc<RosterLookup>,
    messenger: Arc<dyn ReplyPort>,
) -> anyhow::Result<()> {
    let addr = SocketAddr::new(cfg.bind_addr, cfg.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "seatbot listening; webhook at POST /callback");
    info!(roster = %roster_host(&cfg.roster_csv_url), "roster source");

    let state = Arc::new(AppState {
        cfg,
        lookup,
        messenger,
    });

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("seatbot stopped");
    Ok(())
}

async fn callback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(signature) = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
    else {
        warn!("webhook rejected: missing signature header");
        return StatusCode::BAD_REQUEST.into_response();
    };

    if !verify_signature(&body, signature, &state.cfg.line_channel_secret) {
        warn!("webhook rejected: invalid signature");
        return StatusCode::BAD_REQUEST.into_response();
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "webhook rejected: malformed payload");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    handlers::dispatch(&state, payload).await;

    (StatusCode::OK, "OK").into_response()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

// Log the host only; published sheet URLs act as read credentials.
fn roster_host(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "<invalid>".to_string())
}
