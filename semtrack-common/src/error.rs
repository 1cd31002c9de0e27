//! Common error types for SemTrack

use thiserror::Error;

/// Result type used throughout the SemTrack crates
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared between the library and service crates.
///
/// `NotFound` and `InvalidInput` are caller-visible outcomes; the rest
/// surface as opaque failures at the API boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// Store failure (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem failure while preparing the root folder or database
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Target seminar absent on update or delete
    #[error("Not found: {0}")]
    NotFound(String),

    /// Write rejected: required field missing or blank
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Broken invariant, e.g. a record unreadable right after its write
    #[error("Internal error: {0}")]
    Internal(String),
}
