//! Mapbox geocoding client.

use std::sync::Arc;

use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ConfigError;
use crate::domain::{Coordinate, PlaceQuery};
use crate::fetch::JsonFetcher;

use super::decode::decode;
use super::error::LookupError;
use super::{endpoint, parse_base_url};

/// Default base URL for the Mapbox Geocoding v5 places endpoint.
const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

/// Configuration for the geocoder.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Mapbox access token
    pub access_token: String,
    /// Base URL for the API
    pub base_url: String,
}

impl GeocoderConfig {
    /// Create a new config with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Turns free-text place names into coordinates.
#[derive(Clone)]
pub struct Geocoder {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: Url,
    access_token: String,
}

impl Geocoder {
    /// Create a new geocoder.
    pub fn new(config: GeocoderConfig, fetcher: Arc<dyn JsonFetcher>) -> Result<Self, ConfigError> {
        Ok(Self {
            fetcher,
            base_url: parse_base_url(&config.base_url)?,
            access_token: config.access_token,
        })
    }

    /// Build the request URL for a place.
    ///
    /// The place is the last path segment, so it is percent-encoded in full
    /// (spaces, slashes, `?` and `#` included).
    pub fn request_url(&self, place: &PlaceQuery) -> Url {
        let mut url = endpoint(&self.base_url, &[&format!("{}.json", place.as_str())]);
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .append_pair("limit", "1");
        url
    }

    /// Resolve a place to the coordinate of the best match.
    pub async fn locate(&self, place: &PlaceQuery) -> Result<Coordinate, LookupError> {
        let body = self.fetcher.get_json(&self.request_url(place)).await?;
        let coordinate = first_feature_coordinate(&body, place)?;
        debug!(%place, %coordinate, "geocoded place");
        Ok(coordinate)
    }
}

/// Geocoding reply: a GeoJSON feature collection, best match first.
#[derive(Debug, Deserialize)]
struct GeocodeReply {
    features: Vec<Feature>,
}

/// Mapbox reports positions as `[longitude, latitude]`, both in the
/// feature's `center` and in its point `geometry`; `center` is preferred.
#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    center: Option<Vec<f64>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<f64>,
}

impl Feature {
    fn position(&self) -> Option<&[f64]> {
        self.center
            .as_deref()
            .or_else(|| self.geometry.as_ref().map(|g| g.coordinates.as_slice()))
    }
}

/// Extract the coordinate of the first feature.
fn first_feature_coordinate(body: &Value, place: &PlaceQuery) -> Result<Coordinate, LookupError> {
    let reply: GeocodeReply = decode(body)?;
    let first = reply.features.first().ok_or_else(|| LookupError::PlaceNotFound {
        place: place.to_string(),
    })?;

    match first.position() {
        Some([longitude, latitude, ..]) => Coordinate::new(*latitude, *longitude)
            .map_err(|e| LookupError::Malformed(e.to_string())),
        Some(_) => Err(LookupError::Malformed(
            "feature position is not a [longitude, latitude] pair".to_string(),
        )),
        None => Err(LookupError::Malformed("feature has no position".to_string())),
    }
}
