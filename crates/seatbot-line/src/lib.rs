//! LINE adapter.
//!
//! This crate implements the `seatbot-core` ReplyPort over the LINE Messaging
//! API reply endpoint and serves the webhook that feeds it.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

pub mod handlers;
pub mod router;
pub mod signature;
pub mod webhook;

use seatbot_core::{
    domain::ReplyToken,
    errors::Error,
    messaging::{port::ReplyPort, types::OutgoingMessage},
    Result,
};

/// Reply-API client for one LINE channel.
#[derive(Clone)]
pub struct LineMessenger {
    api_base: String,
    access_token: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for LineMessenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineMessenger")
            .field("api_base", &self.api_base)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: Vec<LineMessage<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum LineMessage<'a> {
    Text {
        text: &'a str,
    },
    Image {
        #[serde(rename = "originalContentUrl")]
        original_content_url: &'a str,
        #[serde(rename = "previewImageUrl")]
        preview_image_url: &'a str,
    },
}

impl<'a> From<&'a OutgoingMessage> for LineMessage<'a> {
    fn from(m: &'a OutgoingMessage) -> Self {
        match m {
            OutgoingMessage::Text { text } => LineMessage::Text { text },
            OutgoingMessage::Image {
                original_content_url,
                preview_image_url,
            } => LineMessage::Image {
                original_content_url,
                preview_image_url,
            },
        }
    }
}

impl LineMessenger {
    /// `api_base` is normally `https://api.line.me`.
    pub fn new(api_base: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(Self::map_err)?;
        Ok(Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            http,
        })
    }

    fn map_err(e: reqwest::Error) -> Error {
        Error::External(format!("line error: {e}"))
    }

    fn reply_url(&self) -> String {
        format!("{}/v2/bot/message/reply", self.api_base)
    }
}

#[async_trait]
impl ReplyPort for LineMessenger {
    async fn reply(&self, token: &ReplyToken, messages: &[OutgoingMessage]) -> Result<()> {
        let body = ReplyRequest {
            reply_token: token.as_str(),
            messages: messages.iter().map(LineMessage::from).collect(),
        };

        // Single attempt: the reply token is consumed by the first accepted call.
        let resp = self
            .http
            .post(self.reply_url())
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_err)?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::External(format!(
                "line reply failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        Ok(())
    }
}
