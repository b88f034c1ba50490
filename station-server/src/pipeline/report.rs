//! Pipeline results.

use std::fmt;

use serde::Serialize;

use crate::domain::{Coordinate, DaylightWindow, DomainError, Station, WeatherSnapshot};
use crate::providers::LookupError;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Geocoding,
    StationLookup,
    Daylight,
    Weather,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Geocoding => "geocoding",
            Stage::StationLookup => "station lookup",
            Stage::Daylight => "daylight lookup",
            Stage::Weather => "weather lookup",
        };
        f.write_str(name)
    }
}

/// One section of a report: either the value, or a marker saying why it's
/// missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section<T> {
    Available(T),
    Unavailable { reason: String },
}

impl<T> Section<T> {
    /// Wrap a stage result, turning a failure into an "unavailable" marker.
    pub fn from_result(result: Result<T, LookupError>) -> Self {
        match result {
            Ok(value) => Section::Available(value),
            Err(e) => Section::Unavailable {
                reason: e.to_string(),
            },
        }
    }

    pub fn available(&self) -> Option<&T> {
        match self {
            Section::Available(v) => Some(v),
            Section::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Section::Available(_))
    }
}

/// Everything we found out about a place.
///
/// A report only exists once the place has been geocoded, so it always has
/// a coordinate; the other sections are filled in independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyReport {
    /// The place as searched for (trimmed)
    pub place: String,
    pub coordinate: Coordinate,
    pub station: Section<Station>,
    pub daylight: Section<DaylightWindow>,
    pub weather: Section<WeatherSnapshot>,
}

impl NearbyReport {
    /// Whether every section is available.
    pub fn is_complete(&self) -> bool {
        self.station.is_available() && self.daylight.is_available() && self.weather.is_available()
    }
}

/// Failures that leave nothing to report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    /// The place query was rejected before any lookup ran
    #[error("invalid place: {0}")]
    InvalidPlace(#[from] DomainError),

    /// The geocoder had no match for the place
    #[error("location not found: {place}")]
    PlaceNotFound { place: String },

    /// The geocoder couldn't be reached or answered nonsense
    #[error("geocoding failed: {0}")]
    Geocoding(LookupError),
}

impl PipelineError {
    /// Message suitable for showing to the person who searched.
    pub fn user_message(&self) -> &'static str {
        match self {
            PipelineError::InvalidPlace(_) => "Please enter a place name",
            PipelineError::PlaceNotFound { .. } => "Location not found",
            PipelineError::Geocoding(_) => {
                "The location service is unavailable right now. Please try again later."
            }
        }
    }
}

impl From<LookupError> for PipelineError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::PlaceNotFound { place } => PipelineError::PlaceNotFound { place },
            other => PipelineError::Geocoding(other),
        }
    }
}
