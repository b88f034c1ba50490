//! Transit station types.

use serde::Serialize;
use serde_json::Value;

use super::Coordinate;

/// Display name of the "no station found" sentinel.
pub const NO_STATION_NAME: &str = "No nearby stations found";

/// Upstream wheelchair boarding code.
///
/// The stop feed reports a tri-state code: `0` for no information, `1` for
/// step-free boarding and `2` for inaccessible. Only `1` counts as
/// accessible; every other value, including codes we don't recognise,
/// decodes to "not accessible".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelchairBoarding {
    NoInformation,
    Accessible,
    Inaccessible,
    Unrecognised,
}

impl WheelchairBoarding {
    /// The single code meaning step-free boarding.
    pub const STEP_FREE_CODE: i64 = 1;

    /// Decode a numeric boarding code.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => WheelchairBoarding::NoInformation,
            Self::STEP_FREE_CODE => WheelchairBoarding::Accessible,
            2 => WheelchairBoarding::Inaccessible,
            _ => WheelchairBoarding::Unrecognised,
        }
    }

    /// Decode a boarding code as it appears in JSON.
    ///
    /// Accepts an integer or a numeric string. `null`, a missing field or
    /// any other shape is treated as "no information".
    pub fn from_json(value: Option<&Value>) -> Self {
        let code = match value {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        code.map_or(WheelchairBoarding::NoInformation, Self::from_code)
    }

    /// Whether boarding is step-free.
    pub fn is_step_free(self) -> bool {
        self == WheelchairBoarding::Accessible
    }
}

/// The nearest transit stop to a location.
///
/// [`Station::not_found`] is the sentinel returned when no stop lies within
/// the search radius. It is a regular value, not an error, so callers can
/// still render everything else they know.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub name: String,
    pub wheelchair_accessible: bool,
    pub coordinate: Option<Coordinate>,
    #[serde(skip)]
    found: bool,
}

impl Station {
    /// Create a found station.
    pub fn new(
        name: impl Into<String>,
        boarding: WheelchairBoarding,
        coordinate: Option<Coordinate>,
    ) -> Self {
        Self {
            name: name.into(),
            wheelchair_accessible: boarding.is_step_free(),
            coordinate,
            found: true,
        }
    }

    /// The "no station found" sentinel.
    pub fn not_found() -> Self {
        Self {
            name: NO_STATION_NAME.to_string(),
            wheelchair_accessible: false,
            coordinate: None,
            found: false,
        }
    }

    /// Whether this is a real stop rather than the sentinel.
    pub fn is_found(&self) -> bool {
        self.found
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Accessible iff the code is exactly the step-free code
        #[test]
        fn accessible_iff_step_free_code(code in any::<i64>()) {
            let accessible = WheelchairBoarding::from_code(code).is_step_free();
            prop_assert_eq!(accessible, code == WheelchairBoarding::STEP_FREE_CODE);
        }

        /// String codes decode the same as their numeric form
        #[test]
        fn string_matches_number(code in -5i64..10) {
            let from_num = WheelchairBoarding::from_json(Some(&serde_json::json!(code)));
            let from_str = WheelchairBoarding::from_json(Some(&serde_json::json!(code.to_string())));
            prop_assert_eq!(from_num, from_str);
        }
    }
}
