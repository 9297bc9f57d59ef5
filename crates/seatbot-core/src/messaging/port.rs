use async_trait::async_trait;

use crate::{domain::ReplyToken, messaging::types::OutgoingMessage, Result};

/// Outbound reply port.
///
/// One call sends every message of a reply in order. Reply tokens are
/// single-use, so implementations must not retry a call that reached the
/// platform.
#[async_trait]
pub trait ReplyPort: Send + Sync {
    async fn reply(&self, token: &ReplyToken, messages: &[OutgoingMessage]) -> Result<()>;
}
