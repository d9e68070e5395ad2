//! Domain-specific error types and error handling.

mod types;


// Re-export all error types
pub use types::ValidationError;

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Delivery failed: {message}")]
    Delivery { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Whether the error was caused by caller input rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(self, DomainError::ValidationErr(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
