//! Messenger-facing abstractions (LINE today).

pub mod port;
pub mod types;
