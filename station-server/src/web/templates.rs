//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{DaylightWindow, Station, WeatherSnapshot};
use crate::pipeline::{NearbyReport, Section};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page: the search form, plus results or an error once submitted.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// The place as typed, echoed back into the form
    pub place: String,
    pub map_token: String,
    pub report: Option<ReportView>,
    pub error: Option<String>,
}

impl IndexTemplate {
    /// The empty form.
    pub fn empty(map_token: &str) -> Self {
        Self {
            place: String::new(),
            map_token: map_token.to_string(),
            report: None,
            error: None,
        }
    }
}

/// About page.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Report view model.
#[derive(Debug, Clone)]
pub struct ReportView {
    pub place: String,
    pub coordinate: String,
    pub latitude: f64,
    pub longitude: f64,
    pub station: Option<StationView>,
    pub station_error: Option<String>,
    pub daylight: Option<DaylightView>,
    pub daylight_error: Option<String>,
    pub weather: Option<WeatherView>,
    pub weather_error: Option<String>,
}

impl ReportView {
    /// Create from a pipeline report.
    pub fn from_report(report: &NearbyReport) -> Self {
        let (station, station_error) = split(&report.station, StationView::from_station);
        let (daylight, daylight_error) = split(&report.daylight, DaylightView::from_window);
        let (weather, weather_error) = split(&report.weather, WeatherView::from_snapshot);

        Self {
            place: report.place.clone(),
            coordinate: report.coordinate.to_string(),
            latitude: report.coordinate.latitude(),
            longitude: report.coordinate.longitude(),
            station,
            station_error,
            daylight,
            daylight_error,
            weather,
            weather_error,
        }
    }
}

fn split<T, V>(section: &Section<T>, view: impl Fn(&T) -> V) -> (Option<V>, Option<String>) {
    match section {
        Section::Available(value) => (Some(view(value)), None),
        Section::Unavailable { reason } => (None, Some(reason.clone())),
    }
}

/// Nearest station view model.
#[derive(Debug, Clone)]
pub struct StationView {
    pub name: String,
    /// False for the "no station nearby" sentinel
    pub found: bool,
    pub accessible: bool,
    /// "lat, lng" for display
    pub coordinate: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl StationView {
    /// Create from a domain Station.
    pub fn from_station(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            found: station.is_found(),
            accessible: station.wheelchair_accessible,
            coordinate: station.coordinate.map(|c| c.to_string()),
            latitude: station.coordinate.map(|c| c.latitude()),
            longitude: station.coordinate.map(|c| c.longitude()),
        }
    }

    /// "Yes" or "No".
    pub fn accessible_label(&self) -> &'static str {
        if self.accessible { "Yes" } else { "No" }
    }
}

/// Daylight view model. Times are shown in UTC.
#[derive(Debug, Clone)]
pub struct DaylightView {
    pub sunrise: String,
    pub sunset: String,
    pub day_length: String,
}

impl DaylightView {
    /// Create from a domain DaylightWindow.
    pub fn from_window(window: &DaylightWindow) -> Self {
        let total_mins = window.day_length().num_minutes();
        let hours = total_mins / 60;
        let mins = total_mins % 60;

        let day_length = if hours > 0 {
            format!("{}h {}m", hours, mins)
        } else {
            format!("{}m", mins)
        };

        Self {
            sunrise: window.sunrise.format("%H:%M UTC").to_string(),
            sunset: window.sunset.format("%H:%M UTC").to_string(),
            day_length,
        }
    }
}

/// Weather view model.
#[derive(Debug, Clone)]
pub struct WeatherView {
    pub description: String,
    pub temperature: String,
}

impl WeatherView {
    /// Create from a domain WeatherSnapshot.
    pub fn from_snapshot(snapshot: &WeatherSnapshot) -> Self {
        Self {
            description: snapshot.description.clone(),
            temperature: format!("{:.1} °C", snapshot.temperature_celsius),
        }
    }
}
