//! Domain types for the nearest-station finder.
//!
//! All types are request-scoped values. Types with invariants enforce them
//! at construction time, so code that receives them can trust their
//! validity.

mod coordinate;
mod daylight;
mod error;
mod place;
mod station;
mod weather;

pub use coordinate::Coordinate;
pub use daylight::DaylightWindow;
pub use error::DomainError;
pub use place::PlaceQuery;
pub use station::{NO_STATION_NAME, Station, WheelchairBoarding};
pub use weather::WeatherSnapshot;
