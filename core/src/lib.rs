//! # msgbridge Core
//!
//! Core domain layer for phone-number verification in the msgbridge backend.
//! This crate contains the pending-challenge entity, the store and delivery
//! seams, the verification service and its background sweeper, and the
//! error types shared by the outer layers.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
