//! Sunrise and sunset for a location.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The daylight window for a location on the current day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaylightWindow {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl DaylightWindow {
    pub fn new(sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Self {
        Self { sunrise, sunset }
    }

    /// Length of the day.
    ///
    /// Both times fall on the same UTC date, so west of Greenwich the
    /// reported sunset can come before sunrise (Boston in summer sets around
    /// 00:25 UTC). That sunset belongs to the following UTC day.
    pub fn day_length(&self) -> chrono::Duration {
        let length = self.sunset.signed_duration_since(self.sunrise);
        if length < chrono::Duration::zero() {
            length + chrono::Duration::days(1)
        } else {
            length
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn day_length() {
        let w = DaylightWindow::new(ts("2026-10-19T11:07:00+00:00"), ts("2026-10-19T22:02:30+00:00"));
        assert_eq!(w.day_length(), chrono::Duration::seconds(10 * 3600 + 55 * 60 + 30));
    }

    #[test]
    fn day_length_wraps_midnight_utc() {
        let w = DaylightWindow::new(ts("2026-06-21T09:07:00+00:00"), ts("2026-06-21T00:25:00+00:00"));
        assert_eq!(w.day_length(), chrono::Duration::minutes(15 * 60 + 18));
    }

    #[test]
    fn serializes_rfc3339() {
        let w = DaylightWindow::new(ts("2026-10-19T11:07:00+00:00"), ts("2026-10-19T22:02:30+00:00"));
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["sunrise"], "2026-10-19T11:07:00Z");
        assert_eq!(json["sunset"], "2026-10-19T22:02:30Z");
    }
}
