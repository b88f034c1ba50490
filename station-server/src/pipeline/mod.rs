//! Request pipeline.
//!
//! Validates the place, geocodes it, then fans out to the station,
//! daylight and weather lookups and assembles a [`NearbyReport`].

mod report;
mod service;


pub use report::{NearbyReport, PipelineError, Section, Stage};
pub use service::NearbyService;
