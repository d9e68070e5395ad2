//! Traits for challenge storage and code delivery

use async_trait::async_trait;

use crate::domain::entities::PendingChallenge;

/// Storage for pending OTP challenges, one per phone number.
///
/// Operations are synchronous in-memory mutations and never fail; absence
/// is an ordinary `None`/`false`, not an error.
pub trait OtpStore: Send + Sync {
    /// Store a fresh challenge with zero attempts, replacing any prior one
    fn issue(&self, phone: &str, code: &str, ttl_minutes: i64);

    /// Current unexpired challenge; an expired entry is deleted by this read
    fn get(&self, phone: &str) -> Option<PendingChallenge>;

    /// Increment attempts on an existing challenge; `false` when absent
    fn register_failed_attempt(&self, phone: &str) -> bool;

    /// Remove any challenge for the phone number
    fn delete(&self, phone: &str);

    /// Remove every expired challenge, returning how many were removed
    fn sweep(&self) -> usize;

    /// Number of stored challenges, including ones not yet swept
    fn len(&self) -> usize;

    /// Whether the store holds no challenges
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outbound channel relaying issued codes to the phone owner
#[async_trait]
pub trait OtpSender: Send + Sync {
    /// Deliver `code` to `phone`, returning the provider message id
    async fn send_otp(&self, phone: &str, code: &str) -> Result<String, String>;
}
