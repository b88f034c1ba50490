//! Nearest transit station server.
//!
//! A web application that answers: "I'm here, where's the nearest
//! station, can I get on it in a wheelchair, and what's it like outside?"

pub mod config;
pub mod domain;
pub mod fetch;
pub mod pipeline;
pub mod providers;
pub mod web;

#[cfg(test)]
mod fixtures;
