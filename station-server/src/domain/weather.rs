//! Current weather conditions.

use serde::Serialize;

/// Current conditions at a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    /// Condition description, first letter capitalized (e.g. "Light rain")
    pub description: String,
    pub temperature_celsius: f64,
}

impl WeatherSnapshot {
    /// Create a snapshot, capitalizing the description for display.
    pub fn new(description: &str, temperature_celsius: f64) -> Self {
        Self {
            description: capitalize(description.trim()),
            temperature_celsius,
        }
    }
}

/// Uppercase the first character, leaving the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_description() {
        let w = WeatherSnapshot::new("light rain", 11.2);
        assert_eq!(w.description, "Light rain");
        assert_eq!(w.temperature_celsius, 11.2);
    }

    #[test]
    fn capitalize_edge_cases() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("x"), "X");
        assert_eq!(capitalize("Clear sky"), "Clear sky");
        assert_eq!(capitalize("überfrost"), "Überfrost");
    }

    #[test]
    fn trims_before_capitalizing() {
        let w = WeatherSnapshot::new("  overcast clouds ", 3.0);
        assert_eq!(w.description, "Overcast clouds");
    }
}
