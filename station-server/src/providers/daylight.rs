//! sunrise-sunset.org client.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use crate::config::ConfigError;
use crate::domain::{Coordinate, DaylightWindow};
use crate::fetch::JsonFetcher;

use super::decode::decode;
use super::error::LookupError;
use super::{endpoint, parse_base_url};

/// Default base URL for the sunrise-sunset API.
const DEFAULT_BASE_URL: &str = "https://api.sunrise-sunset.org";

/// Configuration for the daylight lookup. The API needs no key.
#[derive(Debug, Clone)]
pub struct DaylightConfig {
    /// Base URL for the API
    pub base_url: String,
}

impl DaylightConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for DaylightConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Looks up today's sunrise and sunset for a coordinate.
#[derive(Clone)]
pub struct DaylightLookup {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: Url,
}

impl DaylightLookup {
    pub fn new(config: DaylightConfig, fetcher: Arc<dyn JsonFetcher>) -> Result<Self, ConfigError> {
        Ok(Self {
            fetcher,
            base_url: parse_base_url(&config.base_url)?,
        })
    }

    /// Build the request URL. `formatted=0` asks for ISO-8601 timestamps.
    pub fn request_url(&self, at: Coordinate) -> Url {
        let mut url = endpoint(&self.base_url, &["json"]);
        url.query_pairs_mut()
            .append_pair("lat", &at.latitude().to_string())
            .append_pair("lng", &at.longitude().to_string())
            .append_pair("formatted", "0");
        url
    }

    pub async fn daylight(&self, at: Coordinate) -> Result<DaylightWindow, LookupError> {
        let body = self.fetcher.get_json(&self.request_url(at)).await?;
        window_from_reply(&body)
    }
}

/// Reply envelope. `results` is only meaningful when `status` is `"OK"`.
#[derive(Debug, Deserialize)]
struct SunStatus {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SunReply {
    results: SunResults,
}

/// With `formatted=0` both times are ISO-8601 in UTC.
#[derive(Debug, Deserialize)]
struct SunResults {
    sunrise: DateTime<Utc>,
    sunset: DateTime<Utc>,
}

fn window_from_reply(body: &Value) -> Result<DaylightWindow, LookupError> {
    let SunStatus { status } = decode(body)?;
    match status.as_deref() {
        Some(status) if status != "OK" => {
            return Err(LookupError::Malformed(format!(
                "daylight provider returned status {status}"
            )));
        }
        _ => {}
    }

    let SunReply { results } = decode(body)?;
    Ok(DaylightWindow::new(results.sunrise, results.sunset))
}
