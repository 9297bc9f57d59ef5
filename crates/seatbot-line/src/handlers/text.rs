use tracing::{info, warn};

use seatbot_core::{
    messaging::types::TextMessage,
    reply::compose_and_send,
    roster::LookupResult,
};

use crate::router::AppState;

pub async fn handle_text(state: &AppState, msg: TextMessage) {
    let query = msg.text.trim();
    let user = msg.user_id.as_ref().map(|u| u.0.as_str()).unwrap_or("unknown");

    let result = state.lookup.lookup(query).await;
    let outcome = match &result {
        LookupResult::Found(_) => "found",
        LookupResult::NotFound => "not_found",
        LookupResult::FetchError(_) => "fetch_error",
    };
    info!(user, query, outcome, "seat lookup");

    // Delivery failures are logged only; the reply token cannot be reused.
    if let Err(e) = compose_and_send(
        &*state.messenger,
        &msg.reply_token,
        query,
        &result,
        &state.cfg.seat_map_image_url,
    )
    .await
    {
        warn!(user, error = %e, "failed to deliver reply");
    }
}
