//! HTTP JSON fetching.
//!
//! Every upstream provider is reached through the [`JsonFetcher`] trait:
//! GET a URL, get back a parsed JSON tree. The production implementation
//! is [`HttpJsonFetcher`]; [`MockFetcher`] serves canned replies for tests
//! and records every request it sees.

mod client;
mod error;
mod mock;

pub use client::{FetchConfig, HttpJsonFetcher, JsonFetcher, redact};
pub use error::FetchError;
pub use mock::MockFetcher;
