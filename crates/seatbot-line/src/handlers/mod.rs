//! Webhook event dispatch.
//!
//! Only plain-text message events get a reply; every other event or message
//! type is dropped here.

use tracing::debug;

use seatbot_core::{
    domain::{ReplyToken, UserId},
    messaging::types::TextMessage,
};

use crate::router::AppState;
use crate::webhook::{EventMessage, WebhookEvent, WebhookPayload};

mod text;

/// Handle every event of a verified payload, in order.
pub async fn dispatch(state: &AppState, payload: WebhookPayload) {
    for event in payload.events {
        match event {
            WebhookEvent::Message {
                reply_token,
                source,
                message: EventMessage::Text { text, .. },
            } => {
                let Some(reply_token) = reply_token else {
                    debug!("text message without reply token (standby mode?); skipping");
                    continue;
                };
                let msg = TextMessage {
                    reply_token: ReplyToken(reply_token),
                    user_id: source.and_then(|s| s.user_id).map(UserId),
                    text,
                };
                text::handle_text(state, msg).await;
            }
            WebhookEvent::Message { .. } => debug!("ignoring non-text message"),
            WebhookEvent::Other => debug!("ignoring non-message event"),
        }
    }
}
