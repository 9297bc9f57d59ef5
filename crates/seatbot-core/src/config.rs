use std::{env, fs, net::IpAddr, path::Path, time::Duration};

use crate::{errors::Error, Result};

/// Typed configuration for the seat-finder bot.
///
/// Built once at startup and shared by reference; nothing reads the
/// environment after `load()` returns.
#[derive(Clone, Debug)]
pub struct Config {
    // LINE channel
    pub line_channel_access_token: String,
    pub line_channel_secret: String,
    pub line_api_base: String,

    // Roster + seat map
    pub roster_csv_url: String,
    pub seat_map_image_url: String,
    pub roster_fetch_timeout: Option<Duration>,

    // HTTP server
    pub bind_addr: IpAddr,
    pub port: u16,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the process env in `load()`).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Secrets are not validated here. A missing access token surfaces as a
        // LINE auth failure on first reply; a missing secret makes every
        // webhook fail signature verification.
        let line_channel_access_token = get("LINE_CHANNEL_ACCESS_TOKEN").unwrap_or_default();
        let line_channel_secret = get("LINE_CHANNEL_SECRET").unwrap_or_default();
        if line_channel_access_token.trim().is_empty() {
            tracing::warn!("LINE_CHANNEL_ACCESS_TOKEN is not set; replies will be rejected by LINE");
        }
        if line_channel_secret.trim().is_empty() {
            tracing::warn!("LINE_CHANNEL_SECRET is not set; webhook signatures will not verify");
        }

        let line_api_base = get("LINE_API_BASE")
            .and_then(non_empty)
            .unwrap_or_else(|| "https://api.line.me".to_string());
        let line_api_base = require_http_url("LINE_API_BASE", &line_api_base)?
            .trim_end_matches('/')
            .to_string();

        let roster_csv_url = get("ROSTER_CSV_URL").and_then(non_empty).ok_or_else(|| {
            Error::Config("ROSTER_CSV_URL environment variable is required".to_string())
        })?;
        let roster_csv_url = require_http_url("ROSTER_CSV_URL", &roster_csv_url)?;

        let seat_map_image_url = get("SEAT_MAP_IMAGE_URL")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("SEAT_MAP_IMAGE_URL environment variable is required".to_string())
            })?;
        let seat_map_image_url = require_http_url("SEAT_MAP_IMAGE_URL", &seat_map_image_url)?;

        let roster_fetch_timeout = parse_u64(&get, "ROSTER_FETCH_TIMEOUT_MS")?
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        let bind_addr = match get("BIND_ADDR").and_then(non_empty) {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|e| Error::Config(format!("BIND_ADDR is not an IP address: {e}")))?,
            None => IpAddr::from([0, 0, 0, 0]),
        };
        let port = match get("PORT").and_then(non_empty) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| Error::Config(format!("PORT is not a valid port: {e}")))?,
            None => 5000,
        };

        Ok(Self {
            line_channel_access_token,
            line_channel_secret,
            line_api_base,
            roster_csv_url,
            seat_map_image_url,
            roster_fetch_timeout,
            bind_addr,
            port,
        })
    }
}

fn require_http_url(key: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| Error::Config(format!("{key} is not a valid URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "{key} must be an http(s) URL, got scheme `{}`",
            url.scheme()
        )));
    }
    Ok(trimmed.to_string())
}

fn parse_u64(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    let Some(raw) = get(key).and_then(non_empty) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|e| Error::Config(format!("{key} is not a number: {e}")))
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim().trim_start_matches("export ").trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
