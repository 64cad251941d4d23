//! Error types for the DQSEGDB WUI session service.

use thiserror::Error;

/// Main error type for session operations.
#[derive(Error, Debug)]
pub enum WuiError {
    /// The host directory returned no record for the default host id.
    #[error("no host record found for default host id {host_id}")]
    MissingDefaultHost { host_id: i64 },

    /// A configured default could not be supplied.
    #[error("configuration default unavailable: {0}")]
    ConfigurationUnavailable(String),

    /// Session with the given ID was not found.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// A session value update was malformed.
    #[error("invalid session update: {0}")]
    InvalidUpdate(String),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for session operations.
pub type Result<T> = std::result::Result<T, WuiError>;
