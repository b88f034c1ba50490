//! The geocode → nearest-station → enrichment pipeline.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{AppConfig, ConfigError};
use crate::domain::{Coordinate, PlaceQuery};
use crate::fetch::JsonFetcher;
use crate::providers::{
    DaylightLookup, Geocoder, LookupError, StationResolver, WeatherLookup,
};

use super::report::{NearbyReport, PipelineError, Section, Stage};

/// Answers "what's the nearest station to this place, and what's it like
/// there right now?".
///
/// Stages run as `Geocoding → (StationLookup ∥ Daylight ∥ Weather)`. Only
/// validation and geocoding failures abort; the later lookups depend only on
/// the coordinate, so they run concurrently and fail independently.
#[derive(Clone)]
pub struct NearbyService {
    geocoder: Geocoder,
    stations: StationResolver,
    daylight: DaylightLookup,
    weather: WeatherLookup,
}

impl NearbyService {
    pub fn new(
        geocoder: Geocoder,
        stations: StationResolver,
        daylight: DaylightLookup,
        weather: WeatherLookup,
    ) -> Self {
        Self {
            geocoder,
            stations,
            daylight,
            weather,
        }
    }

    /// Build all four provider clients over one shared fetcher.
    pub fn from_config(
        config: &AppConfig,
        fetcher: Arc<dyn JsonFetcher>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(
            Geocoder::new(config.geocoder.clone(), fetcher.clone())?,
            StationResolver::new(config.stops.clone(), fetcher.clone())?,
            DaylightLookup::new(config.daylight.clone(), fetcher.clone())?,
            WeatherLookup::new(config.weather.clone(), fetcher)?,
        ))
    }

    /// Run the whole pipeline for a user-supplied place name.
    ///
    /// Blank input is rejected before any request is made.
    pub async fn lookup(&self, place: &str) -> Result<NearbyReport, PipelineError> {
        let place = PlaceQuery::parse(place)?;

        let coordinate = self.geocoder.locate(&place).await.map_err(|e| {
            warn!(stage = %Stage::Geocoding, %place, error = %e, "lookup aborted");
            PipelineError::from(e)
        })?;

        let (station, daylight, weather) = tokio::join!(
            self.stations.nearest(coordinate),
            self.daylight.daylight(coordinate),
            self.weather.current(coordinate),
        );

        let report = NearbyReport {
            place: place.to_string(),
            coordinate,
            station: section(Stage::StationLookup, coordinate, station),
            daylight: section(Stage::Daylight, coordinate, daylight),
            weather: section(Stage::Weather, coordinate, weather),
        };

        info!(
            %place,
            %coordinate,
            station = report.station.available().map(|s| s.name.as_str()).unwrap_or("-"),
            complete = report.is_complete(),
            "lookup finished"
        );

        Ok(report)
    }
}

/// Turn a post-geocoding stage result into a report section, logging failures.
fn section<T>(stage: Stage, at: Coordinate, result: Result<T, LookupError>) -> Section<T> {
    if let Err(e) = &result {
        warn!(%stage, %at, error = %e, "section unavailable");
    }
    Section::from_result(result)
}
