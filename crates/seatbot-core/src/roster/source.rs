use std::time::Duration;

use async_trait::async_trait;

use super::RosterError;

/// Where the roster CSV comes from.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Fetch the raw CSV text. Called once per lookup.
    async fn fetch_csv(&self) -> Result<String, RosterError>;
}

/// Fetches the roster with a single HTTP GET (no retries).
#[derive(Clone, Debug)]
pub struct HttpRosterSource {
    url: String,
    http: reqwest::Client,
}

impl HttpRosterSource {
    /// `timeout: None` keeps the reqwest default (no timeout).
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, RosterError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            url: url.into(),
            http: builder.build()?,
        })
    }
}

#[async_trait]
impl RosterSource for HttpRosterSource {
    async fn fetch_csv(&self) -> Result<String, RosterError> {
        let resp = self.http.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RosterError::HttpStatus(status.as_u16()));
        }

        // Spreadsheet exports are UTF-8; decode as such regardless of the
        // declared charset.
        let bytes = resp.bytes().await?;
        decode_utf8(bytes.to_vec())
    }
}

fn decode_utf8(bytes: Vec<u8>) -> Result<String, RosterError> {
    String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        RosterError::Parse {
            line: valid.iter().filter(|b| **b == b'\n').count() + 1,
            reason: "invalid UTF-8".to_string(),
        }
    })
}
