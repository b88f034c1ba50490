//! Process-wide configuration.
//!
//! Built once at startup from the environment (plus an optional `.env`
//! file) and handed to each component explicitly. Missing credentials are
//! reported together, before the server binds.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::FetchConfig;
use crate::providers::{DaylightConfig, GeocoderConfig, StopsConfig, WeatherConfig};

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default per-request timeout for upstream calls, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default pause before retrying an upstream call.
const RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Most attempts we allow per upstream call, however it is configured.
const MAX_ATTEMPTS_CAP: u32 = 5;

/// Required credential variables.
const REQUIRED_KEYS: [&str; 3] = ["MAPBOX_TOKEN", "MBTA_API_KEY", "OPENWEATHER_API_KEY"];

/// Configuration errors. All are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// One or more required variables are unset or empty
    #[error("missing required environment variable(s): {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    /// A variable is set but can't be used
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },

    /// A provider base URL doesn't parse
    #[error("invalid base URL {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// The `.env` file exists but can't be read
    #[error("failed to read {}: {message}", path.display())]
    DotEnv { path: PathBuf, message: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Mapbox token, used for geocoding and for the browser map
    pub mapbox_token: String,
    pub geocoder: GeocoderConfig,
    pub stops: StopsConfig,
    pub daylight: DaylightConfig,
    pub weather: WeatherConfig,
    pub fetch: FetchConfig,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory, if present, is loaded first;
    /// variables already set in the environment take precedence.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ConfigError::DotEnv {
                    path: PathBuf::from(".env"),
                    message: e.to_string(),
                });
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from a `.env`-style file only, ignoring the process
    /// environment.
    pub fn from_dotenv_file(path: &Path) -> Result<Self, ConfigError> {
        let dotenv_err = |message: String| ConfigError::DotEnv {
            path: path.to_path_buf(),
            message,
        };

        let mut vars = HashMap::new();
        for item in dotenvy::from_path_iter(path).map_err(|e| dotenv_err(e.to_string()))? {
            let (key, value) = item.map_err(|e| dotenv_err(e.to_string()))?;
            vars.insert(key, value);
        }
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let mapbox_token = get("MAPBOX_TOKEN").unwrap_or_default();
        let mbta_api_key = get("MBTA_API_KEY").unwrap_or_default();
        let openweather_api_key = get("OPENWEATHER_API_KEY").unwrap_or_default();

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                message: e.to_string(),
            })?;

        let timeout_secs = parse_or(&get, "FETCH_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "FETCH_TIMEOUT_SECS",
                message: "timeout must be at least 1 second".to_string(),
            });
        }

        let max_attempts: u32 = parse_or(&get, "FETCH_MAX_ATTEMPTS", 1)?;
        if !(1..=MAX_ATTEMPTS_CAP).contains(&max_attempts) {
            return Err(ConfigError::Invalid {
                key: "FETCH_MAX_ATTEMPTS",
                message: format!("must be between 1 and {MAX_ATTEMPTS_CAP}"),
            });
        }

        let radius: f64 = parse_or(&get, "STATION_RADIUS", crate::providers::DEFAULT_RADIUS)?;

        let mut geocoder = GeocoderConfig::new(mapbox_token.clone());
        if let Some(url) = get("MAPBOX_BASE_URL") {
            geocoder = geocoder.with_base_url(url);
        }

        let mut stops = StopsConfig::new(mbta_api_key).with_radius(radius);
        if let Some(url) = get("MBTA_BASE_URL") {
            stops = stops.with_base_url(url);
        }

        let mut daylight = DaylightConfig::new();
        if let Some(url) = get("SUNRISE_BASE_URL") {
            daylight = daylight.with_base_url(url);
        }

        let mut weather = WeatherConfig::new(openweather_api_key);
        if let Some(url) = get("OPENWEATHER_BASE_URL") {
            weather = weather.with_base_url(url);
        }

        let fetch = FetchConfig::new()
            .with_timeout(Duration::from_secs(timeout_secs))
            .with_retries(max_attempts, RETRY_BACKOFF);

        Ok(Self {
            bind_addr,
            static_dir: PathBuf::from(get("STATIC_DIR").unwrap_or_else(|| "static".to_string())),
            mapbox_token,
            geocoder,
            stops,
            daylight,
            weather,
            fetch,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: format!("{raw:?}: {e}"),
        }),
    }
}
