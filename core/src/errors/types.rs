//! Input validation errors
//!
//! User-facing wording is chosen by the presentation layer; these variants
//! only carry which field failed.

use thiserror::Error;

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },
}
