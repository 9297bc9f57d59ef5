//! Core domain + application logic for the seat-finder bot.
//!
//! This crate is intentionally framework-agnostic. LINE and the HTTP server
//! live behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod reply;
pub mod roster;

pub use errors::{Error, Result};
