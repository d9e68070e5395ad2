//! Outbound OTP delivery
//!
//! Implementations of `OtpSender`:
//! - **Log**: logs a masked delivery (development, tests)
//! - **WhatsApp**: WhatsApp Cloud API text message
//!
//! Phone numbers are masked in every log line and codes are never logged.

use std::sync::Arc;

use mb_core::services::verification::OtpSender;
use mb_shared::config::{DeliveryConfig, DeliveryProvider};

pub mod log_sender;
pub mod whatsapp;


pub use log_sender::LogOtpSender;
pub use whatsapp::{WhatsAppConfig, WhatsAppOtpSender};

/// Body of the message carrying a code
pub fn otp_message_body(code: &str) -> String {
    format!(
        "Your verification code is {}. Do not share this code with anyone.",
        code
    )
}

/// Create an OTP sender based on configuration
///
/// Falls back to the log sender when WhatsApp is selected but its
/// credentials are missing or the client cannot be built.
pub fn create_otp_sender(config: &DeliveryConfig) -> Arc<dyn OtpSender> {
    match config.provider {
        DeliveryProvider::Log => Arc::new(LogOtpSender::new()),
        DeliveryProvider::WhatsApp => {
            let whatsapp_config = match WhatsAppConfig::from_delivery_config(config) {
                Ok(whatsapp_config) => whatsapp_config,
                Err(e) => {
                    tracing::error!("Invalid WhatsApp delivery configuration: {}", e);
                    tracing::warn!("Falling back to log OTP sender");
                    return Arc::new(LogOtpSender::new());
                }
            };

            match WhatsAppOtpSender::new(whatsapp_config) {
                Ok(sender) => Arc::new(sender),
                Err(e) => {
                    tracing::error!("Failed to initialize WhatsApp OTP sender: {}", e);
                    tracing::warn!("Falling back to log OTP sender");
                    Arc::new(LogOtpSender::new())
                }
            }
        }
    }
}
