//! # Infrastructure Layer
//!
//! Concrete implementations of the core seams for the msgbridge backend.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: process-local store for pending OTP challenges
//! - **Messaging**: OTP delivery (log, WhatsApp Cloud API)

// Re-export core types for convenience
pub use mb_core::errors::*;

/// Cache module - pending OTP challenge storage
pub mod cache;

/// Messaging module - outbound OTP delivery
pub mod messaging;

pub use cache::InMemoryOtpStore;
pub use messaging::{create_otp_sender, LogOtpSender, WhatsAppOtpSender};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider rejected the request with a non-success status
    #[error("Provider returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Message delivery error
    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl InfrastructureError {
    /// Whether repeating the same request may succeed
    ///
    /// Transport failures, 5xx and 429 are transient; other 4xx responses and
    /// malformed success bodies are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            InfrastructureError::Http(e) => !e.is_decode() && !e.is_builder(),
            InfrastructureError::Api { status, .. } => *status >= 500 || *status == 429,
            InfrastructureError::Config(_) | InfrastructureError::Delivery(_) => false,
        }
    }
}
