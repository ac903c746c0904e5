//! Directory API error types.

use gate_core::errors::CoreError;
use thiserror::Error;

/// Message shown for any transport-level failure.
pub const NETWORK_MESSAGE: &str = "Network error. Please try again.";

/// Message used when a failing response carries none of its own.
pub const DEFAULT_MESSAGE: &str = "An error occurred";

/// Errors returned by a directory store.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or the store rejected the payload.
    #[error("{0}")]
    Validation(String),

    /// The record does not exist, or is in the wrong state for the call.
    #[error("{0}")]
    NotFound(String),

    /// The credential is missing, expired, or rejected. The session has
    /// already been invalidated when this is returned.
    #[error("{0}")]
    Unauthorized(String),

    /// Signed in, but the role may not perform this call.
    #[error("{0}")]
    Forbidden(String),

    /// Any other non-success status.
    #[error("{message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// Transport failure: DNS, connect, timeout, or a dropped body.
    #[error("Network error. Please try again.")]
    Network(#[source] reqwest::Error),

    /// A success response whose body does not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The client could not be constructed.
    #[error("client error: {0}")]
    Client(String),
}

impl ApiError {
    /// Whether the caller must sign in again.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NotFound { .. } => Self::NotFound(error.to_string()),
            CoreError::Validation(message) => Self::Validation(message),
            CoreError::InvalidTransition { .. } | CoreError::Other(_) => {
                Self::Validation(error.to_string())
            }
        }
    }
}

/// Convenience alias used by every store call.
pub type ApiResult<T> = Result<T, ApiError>;
