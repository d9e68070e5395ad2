//! Log-only OTP sender
//!
//! Logs deliveries instead of sending them. The last code per phone is kept
//! in memory so local runs and tests can read it back.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};
use uuid::Uuid;

use mb_core::services::verification::OtpSender;
use mb_shared::utils::phone::{is_valid_international_phone, mask_phone_number};

/// OTP sender for development and testing
#[derive(Clone)]
pub struct LogOtpSender {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Last code handed over per phone number
    last_codes: Arc<Mutex<HashMap<String, String>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
}

impl LogOtpSender {
    /// Create a new log sender
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            last_codes: Arc::new(Mutex::new(HashMap::new())),
            simulate_failure: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Last code sent to `phone`
    pub fn last_code(&self, phone: &str) -> Option<String> {
        self.last_codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(phone)
            .cloned()
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

impl Default for LogOtpSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpSender for LogOtpSender {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<String, String> {
        let masked = mask_phone_number(phone);

        if !is_valid_international_phone(phone) {
            return Err(format!("Invalid phone number format: {}", masked));
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(phone = %masked, "Simulated OTP delivery failure");
            return Err("Simulated delivery failure".to_string());
        }

        let message_id = format!("log-{}", Uuid::new_v4());
        self.last_codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(phone.to_string(), code.to_string());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            phone = %masked,
            message_id = %message_id,
            total_sent = count,
            "OTP delivery logged (no message sent)"
        );

        Ok(message_id)
    }
}
