//! Canned upstream replies shared by the pipeline and web tests.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::config::AppConfig;
use crate::fetch::MockFetcher;
use crate::pipeline::NearbyService;

pub const MAPBOX: &str = "http://mapbox.test/geocoding/v5/mapbox.places";
pub const MBTA: &str = "http://mbta.test";
pub const SUNRISE: &str = "http://sun.test";
pub const OPENWEATHER: &str = "http://owm.test";

/// Configuration pointing every provider at the mock hosts above.
pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| {
        let value = match key {
            "MAPBOX_TOKEN" => "pk.test",
            "MBTA_API_KEY" => "mbta-test",
            "OPENWEATHER_API_KEY" => "owm-test",
            "MAPBOX_BASE_URL" => MAPBOX,
            "MBTA_BASE_URL" => MBTA,
            "SUNRISE_BASE_URL" => SUNRISE,
            "OPENWEATHER_BASE_URL" => OPENWEATHER,
            _ => return None,
        };
        Some(value.to_string())
    })
    .unwrap()
}

pub fn service(mock: &MockFetcher) -> NearbyService {
    NearbyService::from_config(&test_config(), Arc::new(mock.clone())).unwrap()
}

pub fn harvard_geocode() -> Value {
    json!({
        "type": "FeatureCollection",
        "query": ["harvard", "university"],
        "features": [{
            "id": "poi.1",
            "place_name": "Harvard University, Cambridge, Massachusetts 02138, United States",
            "center": [-71.1167, 42.377]
        }]
    })
}

pub fn harvard_stops() -> Value {
    json!({
        "data": [{
            "type": "stop",
            "id": "place-harsq",
            "attributes": {
                "name": "Harvard",
                "wheelchair_boarding": 1,
                "latitude": 42.373362,
                "longitude": -71.118956
            }
        }]
    })
}

pub fn daylight() -> Value {
    json!({
        "results": {
            "sunrise": "2026-10-19T11:07:21+00:00",
            "sunset": "2026-10-19T22:02:04+00:00"
        },
        "status": "OK"
    })
}

pub fn weather() -> Value {
    json!({
        "weather": [{"main": "Clouds", "description": "scattered clouds"}],
        "main": {"temp": 12.4}
    })
}

/// A mock serving the Harvard example end to end.
pub fn harvard_mock() -> MockFetcher {
    MockFetcher::new()
        .with_json(MAPBOX, harvard_geocode())
        .with_json(MBTA, harvard_stops())
        .with_json(SUNRISE, daylight())
        .with_json(OPENWEATHER, weather())
}
