//! Error types for repository operations
//!
//! A cache miss is never an error: miss-capable operations return
//! `Ok(None)` and fall through to the next source in a chain. The variants
//! here cover real failures (authoritative source faults, caller misuse,
//! bad configuration).

use thiserror::Error;

/// Main error type for repository operations
#[derive(Error, Debug)]
pub enum RepoError {
    /// Caller misuse - malformed request such as a zero limit
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error - invalid TTL setup or an empty source chain
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Authoritative source failure - surfaced to the caller unchanged
    #[error("Source failure: {0}")]
    Source(String),

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for repository operations
pub type Result<T> = std::result::Result<T, RepoError>;

impl From<String> for RepoError {
    fn from(s: String) -> Self {
        RepoError::Other(s)
    }
}

impl From<&str> for RepoError {
    fn from(s: &str) -> Self {
        RepoError::Other(s.to_string())
    }
}
