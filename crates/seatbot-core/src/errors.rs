use crate::roster::RosterError;

/// Core error type for the seat-finder bot.
///
/// Adapter crates map their specific errors into this type so the handlers
/// can log failures consistently.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("roster error: {0}")]
    Roster(#[from] RosterError),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
