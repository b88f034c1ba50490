//! Web layer for the nearest-station finder.
//!
//! Serves the search page, a JSON lookup endpoint and static assets.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
