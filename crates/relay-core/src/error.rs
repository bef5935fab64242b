//! # Relay Error Types
//!
//! Typed error handling for the payment relay.
//! All relay operations return `Result<T, RelayError>`.
//!
//! Note that an upstream HTTP response with a non-success status is NOT an
//! error here: the relay forwards it verbatim as data. `RelayError` covers
//! the cases where there is no upstream response to forward.

use thiserror::Error;

/// Core error type for all relay operations
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration errors (missing env vars, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data caught before dispatch
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Transport-level failure talking to the bank gateway
    /// (DNS, connection refused, timeout — no upstream response exists)
    #[error("Upstream gateway unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Configuration(_) => 500,
            RelayError::InvalidRequest(_) => 400,
            RelayError::UpstreamUnavailable(_) => 502,
            RelayError::Internal(_) => 500,
        }
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
