//! Cross-cutting error types for gatepass.
//!
//! Crate-specific errors (`ApiError`, `MediaError`, ...) live in their own
//! crates and convert from [`CoreError`] where a rule check precedes I/O.

use thiserror::Error;

/// Errors raised by record validation and lifecycle rules.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result, or the entity is in the wrong state
    /// for the requested operation (e.g. checking out a closed visit).
    #[error("{entity_type} {id} not found")]
    NotFound { entity_type: String, id: String },

    /// A lifecycle transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// A required field is missing or a value is malformed.
    #[error("{0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a `NotFound` on a numeric record id.
    #[must_use]
    pub fn not_found(entity_type: &str, id: i64) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    /// Shorthand for a `Validation` error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
