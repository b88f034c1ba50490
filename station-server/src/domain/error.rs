//! Domain error types.
//!
//! These errors represent validation failures on user input and on
//! values decoded from upstream providers. They are distinct from
//! API/IO errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// The place query was empty or whitespace-only
    #[error("place name must not be empty")]
    EmptyPlace,

    /// Latitude/longitude outside the valid range or not finite
    #[error("invalid coordinate ({latitude}, {longitude}): {reason}")]
    InvalidCoordinate {
        latitude: f64,
        longitude: f64,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyPlace;
        assert_eq!(err.to_string(), "place name must not be empty");

        let err = DomainError::InvalidCoordinate {
            latitude: 91.0,
            longitude: 0.0,
            reason: "latitude must be within [-90, 90]",
        };
        assert_eq!(
            err.to_string(),
            "invalid coordinate (91, 0): latitude must be within [-90, 90]"
        );
    }
}
