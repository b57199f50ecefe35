//! Error types for rewind-core

use thiserror::Error;

/// Main error type for the rewind-core library
#[derive(Error, Debug)]
pub enum Error {
    /// An export could not be parsed as a history document
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Rate-per-day is undefined because the history spans zero whole days
    #[error("rate per day undefined: history spans zero days")]
    DivisionUndefined,

    /// Unknown IANA timezone identifier
    #[error("unknown timezone: {0}")]
    Timezone(String),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for rewind-core
pub type Result<T> = std::result::Result<T, Error>;
