//! Provider lookup error types.

use crate::fetch::FetchError;

/// Errors from a single provider lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The geocoder returned no results for the place
    #[error("place not found: {place}")]
    PlaceNotFound { place: String },

    /// Transport failure reaching the provider (including timeouts)
    #[error("network error: {0}")]
    Network(String),

    /// Error status or non-JSON body
    #[error("decode error: {0}")]
    Decode(String),

    /// Valid JSON, but not the shape we expected
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<FetchError> for LookupError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Network { message } => LookupError::Network(message),
            FetchError::Decode { message } => LookupError::Decode(message),
        }
    }
}
