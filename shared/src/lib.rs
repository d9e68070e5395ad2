//! Shared utilities and common types for the msgbridge server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Response envelopes
//! - Utility functions (phone normalization, validation and masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DeliveryConfig, DeliveryProvider, Environment, LoggingConfig, OtpConfig,
    ServerConfig,
};
pub use types::{ApiResponse, HealthResponse};
pub use utils::phone;
