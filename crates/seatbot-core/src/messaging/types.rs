use crate::domain::{ReplyToken, UserId};

/// An inbound plain-text message, already stripped of platform envelope.
#[derive(Clone, Debug)]
pub struct TextMessage {
    pub reply_token: ReplyToken,
    pub user_id: Option<UserId>,
    pub text: String,
}

/// A single message part of an outbound reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutgoingMessage {
    Text {
        text: String,
    },
    Image {
        original_content_url: String,
        preview_image_url: String,
    },
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Image message using the same URL for the full-size and preview image.
    pub fn image(url: impl Into<String>) -> Self {
        let url = url.into();
        Self::Image {
            original_content_url: url.clone(),
            preview_image_url: url,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Image { .. } => None,
        }
    }
}
