//! Upstream data providers.
//!
//! One client per upstream API, each turning a request into a typed domain
//! value:
//!
//! - [`Geocoder`]: place name → coordinate (Mapbox geocoding)
//! - [`StationResolver`]: coordinate → nearest rail/subway stop (MBTA v3)
//! - [`DaylightLookup`]: coordinate → sunrise/sunset (sunrise-sunset.org)
//! - [`WeatherLookup`]: coordinate → current conditions (OpenWeatherMap)
//!
//! Clients hold no state besides their configuration and a shared
//! [`JsonFetcher`](crate::fetch::JsonFetcher), so each call is exactly one
//! outbound request.

mod daylight;
mod decode;
mod error;
mod geocoder;
mod stops;
mod weather;

use reqwest::Url;

use crate::config::ConfigError;

pub use daylight::{DaylightConfig, DaylightLookup};
pub use error::LookupError;
pub use geocoder::{Geocoder, GeocoderConfig};
pub use stops::{DEFAULT_RADIUS, DEFAULT_ROUTE_TYPES, StationResolver, StopsConfig};
pub use weather::{WeatherConfig, WeatherLookup};

/// Parse a provider base URL, rejecting URLs that can't take path segments.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            message: "not a hierarchical URL".to_string(),
        });
    }

    Ok(url)
}

/// Append percent-encoded path segments to a base URL.
///
/// `base` must have come through [`parse_base_url`].
fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
