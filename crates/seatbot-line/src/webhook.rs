//! LINE webhook payload (the subset we read).

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WebhookEvent {
    Message {
        #[serde(rename = "replyToken", default)]
        reply_token: Option<String>,
        #[serde(default)]
        source: Option<EventSource>,
        message: EventMessage,
    },
    /// follow, unfollow, postback, join, ...
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct EventSource {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventMessage {
    Text {
        #[serde(default)]
        id: Option<String>,
        text: String,
    },
    /// image, sticker, location, ...
    #[serde(other)]
    Other,
}
