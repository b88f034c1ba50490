//! MBTA v3 nearest-stop client.

use std::sync::Arc;

use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ConfigError;
use crate::domain::{Coordinate, Station, WheelchairBoarding};
use crate::fetch::JsonFetcher;

use super::decode::{decode, lenient_number};
use super::error::LookupError;
use super::{endpoint, parse_base_url};

/// Default base URL for the MBTA v3 API.
const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";

/// Default search radius, in degrees (roughly a mile at Boston's latitude).
pub const DEFAULT_RADIUS: f64 = 0.02;

/// Light rail, subway and commuter rail.
pub const DEFAULT_ROUTE_TYPES: [u8; 3] = [0, 1, 2];

/// Configuration for the station resolver.
#[derive(Debug, Clone)]
pub struct StopsConfig {
    /// MBTA API key
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Search radius in degrees
    pub radius: f64,
    /// GTFS route types to consider
    pub route_types: Vec<u8>,
}

impl StopsConfig {
    /// Create a new config with the given API key and default radius and route types.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            radius: DEFAULT_RADIUS,
            route_types: DEFAULT_ROUTE_TYPES.to_vec(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the search radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the route types to search.
    pub fn with_route_types(mut self, route_types: impl Into<Vec<u8>>) -> Self {
        self.route_types = route_types.into();
        self
    }
}

/// Finds the nearest rail or subway stop to a coordinate.
#[derive(Clone)]
pub struct StationResolver {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: Url,
    api_key: String,
    radius: f64,
    route_types: String,
}

impl StationResolver {
    /// Create a new station resolver.
    pub fn new(config: StopsConfig, fetcher: Arc<dyn JsonFetcher>) -> Result<Self, ConfigError> {
        if !config.radius.is_finite() || config.radius <= 0.0 {
            return Err(ConfigError::Invalid {
                key: "STATION_RADIUS",
                message: format!("radius must be a positive number, got {}", config.radius),
            });
        }

        let route_types = config
            .route_types
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",");

        Ok(Self {
            fetcher,
            base_url: parse_base_url(&config.base_url)?,
            api_key: config.api_key,
            radius: config.radius,
            route_types,
        })
    }

    /// Build the distance-sorted stop query for a coordinate.
    pub fn request_url(&self, at: Coordinate) -> Url {
        let mut url = endpoint(&self.base_url, &["stops"]);
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("api_key", &self.api_key)
                .append_pair("filter[latitude]", &at.latitude().to_string())
                .append_pair("filter[longitude]", &at.longitude().to_string())
                .append_pair("filter[radius]", &self.radius.to_string());
            if !self.route_types.is_empty() {
                query.append_pair("filter[route_type]", &self.route_types);
            }
            query.append_pair("sort", "distance");
        }
        url
    }

    /// Find the nearest stop.
    ///
    /// An empty result yields [`Station::not_found`] rather than an error.
    /// When several stops are returned the first is taken as-is; equal
    /// distances are not re-ordered.
    pub async fn nearest(&self, at: Coordinate) -> Result<Station, LookupError> {
        let body = self.fetcher.get_json(&self.request_url(at)).await?;
        let station = nearest_from_reply(&body)?;
        debug!(%at, station = %station.name, accessible = station.wheelchair_accessible, "resolved nearest stop");
        Ok(station)
    }
}

/// JSON:API `/stops` reply, nearest first.
#[derive(Debug, Deserialize)]
struct StopsReply {
    data: Vec<StopResource>,
}

#[derive(Debug, Deserialize)]
struct StopResource {
    attributes: StopAttributes,
}

#[derive(Debug, Deserialize)]
struct StopAttributes {
    name: String,
    /// Kept raw; see [`WheelchairBoarding::from_json`]
    #[serde(default)]
    wheelchair_boarding: Option<Value>,
    #[serde(default, deserialize_with = "lenient_number")]
    latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    longitude: Option<f64>,
}

impl StopAttributes {
    fn into_station(self) -> Station {
        let boarding = WheelchairBoarding::from_json(self.wheelchair_boarding.as_ref());

        // A stop we can name but not place is still worth reporting.
        let coordinate = match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Coordinate::new(lat, lng).ok(),
            _ => None,
        };

        Station::new(self.name, boarding, coordinate)
    }
}

/// Decode the first stop of a reply.
fn nearest_from_reply(body: &Value) -> Result<Station, LookupError> {
    let reply: StopsReply = decode(body)?;
    Ok(reply
        .data
        .into_iter()
        .next()
        .map_or_else(Station::not_found, |stop| stop.attributes.into_station()))
}
