//! Error types for mindbloom-core

use thiserror::Error;

/// Main error type for the mindbloom-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Entry rejected before it reached the store
    #[error("invalid entry: {0}")]
    Validation(String),

    /// Write attempted without a signed-in user
    #[error("User not authenticated")]
    NotAuthenticated,

    /// Entry not found (or owned by another user)
    #[error("entry not found: {0}")]
    EntryNotFound(String),
}

/// Result type alias for mindbloom-core
pub type Result<T> = std::result::Result<T, Error>;
