//! `X-Line-Signature` verification.
//!
//! LINE signs the raw request body with HMAC-SHA256 keyed by the channel
//! secret and sends the digest base64-encoded.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the body signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Check `signature_header` against the body. Comparison is constant-time.
/// An empty secret never verifies: an unconfigured channel rejects every call.
pub fn verify_signature(body: &[u8], signature_header: &str, channel_secret: &str) -> bool {
    if channel_secret.is_empty() {
        warn!("channel secret is not configured; rejecting webhook");
        return false;
    }

    let Ok(expected) = STANDARD.decode(signature_header.trim()) else {
        warn!("signature header is not valid base64");
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        warn!("failed to create HMAC");
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Compute the signature LINE would send for `body`.
pub fn sign(body: &[u8], channel_secret: &str) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes()).ok()?;
    mac.update(body);
    Some(STANDARD.encode(mac.finalize().into_bytes()))
}
