//! # AppError
//!
//! Centralized error handling for the Barsik dashboard.
//! Every upstream failure mode gets its own variant so the log line says
//! what went wrong, even though the page treats them all the same.

use thiserror::Error;

/// The primary error type for all barsik-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// The moderation service could not be reached (DNS, refused, timeout)
    #[error("upstream unreachable: {0}")]
    Transport(String),

    /// The moderation service answered with a non-success status
    #[error("upstream returned status {0}")]
    Status(u16),

    /// The body was not the JSON shape we expected
    #[error("malformed upstream payload: {0}")]
    Decode(String),

    /// The service answered `{"error": "..."}`
    #[error("upstream reported an error: {0}")]
    Upstream(String),

    /// Form input that cannot be turned into settings (e.g., non-numeric duration)
    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("internal service error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

/// A specialized Result type for Barsik logic.
pub type Result<T> = std::result::Result<T, AppError>;
