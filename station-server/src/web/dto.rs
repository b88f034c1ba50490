//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

/// The search form.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    /// Free-text place name; a missing field is treated like an empty one
    #[serde(default)]
    pub place: String,
}

/// Query string for the JSON API.
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    #[serde(default)]
    pub place: String,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
