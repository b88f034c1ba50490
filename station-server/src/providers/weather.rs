//! OpenWeatherMap current-conditions client.

use std::sync::Arc;

use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use crate::config::ConfigError;
use crate::domain::{Coordinate, WeatherSnapshot};
use crate::fetch::JsonFetcher;

use super::decode::{decode, number};
use super::error::LookupError;
use super::{endpoint, parse_base_url};

/// Default base URL for the OpenWeatherMap API.
const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Configuration for the weather lookup.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
}

impl WeatherConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Looks up current weather for a coordinate.
#[derive(Clone)]
pub struct WeatherLookup {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: Url,
    api_key: String,
}

impl WeatherLookup {
    pub fn new(config: WeatherConfig, fetcher: Arc<dyn JsonFetcher>) -> Result<Self, ConfigError> {
        Ok(Self {
            fetcher,
            base_url: parse_base_url(&config.base_url)?,
            api_key: config.api_key,
        })
    }

    /// Build the request URL, asking for metric units so `main.temp` is in °C.
    pub fn request_url(&self, at: Coordinate) -> Url {
        let mut url = endpoint(&self.base_url, &["data", "2.5", "weather"]);
        url.query_pairs_mut()
            .append_pair("lat", &at.latitude().to_string())
            .append_pair("lon", &at.longitude().to_string())
            .append_pair("appid", &self.api_key)
            .append_pair("units", "metric");
        url
    }

    pub async fn current(&self, at: Coordinate) -> Result<WeatherSnapshot, LookupError> {
        let body = self.fetcher.get_json(&self.request_url(at)).await?;
        snapshot_from_reply(&body)
    }
}

/// Current-weather reply; only the fields we show.
#[derive(Debug, Deserialize)]
struct WeatherReply {
    weather: Vec<Condition>,
    main: Readings,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct Readings {
    /// °C, given `units=metric`
    #[serde(deserialize_with = "number")]
    temp: f64,
}

fn snapshot_from_reply(body: &Value) -> Result<WeatherSnapshot, LookupError> {
    let reply: WeatherReply = decode(body)?;
    let condition = reply
        .weather
        .first()
        .ok_or_else(|| LookupError::Malformed("reply has no weather conditions".to_string()))?;
    Ok(WeatherSnapshot::new(&condition.description, reply.main.temp))
}
