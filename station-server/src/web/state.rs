//! Application state for the web layer.

use std::sync::Arc;

use crate::pipeline::NearbyService;

/// Shared application state.
///
/// Everything in here is immutable after startup; requests share nothing
/// else.
#[derive(Clone)]
pub struct AppState {
    /// The lookup pipeline
    pub nearby: Arc<NearbyService>,

    /// Public Mapbox token for the browser map (empty disables the map)
    pub map_token: Arc<str>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(nearby: NearbyService, map_token: impl Into<Arc<str>>) -> Self {
        Self {
            nearby: Arc::new(nearby),
            map_token: map_token.into(),
        }
    }
}
