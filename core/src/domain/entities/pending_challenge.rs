//! Pending OTP challenge entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of failed verification attempts allowed
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for challenges (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// An issued one-time password awaiting verification.
///
/// At most one challenge exists per phone number; the phone number is the
/// key under which the store holds it and is not repeated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChallenge {
    /// The verification digits
    pub code: String,

    /// Failed verification attempts so far
    pub attempts: u32,

    /// Timestamp when the challenge was issued
    pub created_at: DateTime<Utc>,

    /// Instant from which the challenge is no longer valid
    pub expires_at: DateTime<Utc>,
}

impl PendingChallenge {
    /// Creates a fresh challenge issued at `now` with zero attempts
    ///
    /// # Arguments
    ///
    /// * `code` - The verification digits
    /// * `now` - Issuance instant
    /// * `ttl_minutes` - Minutes until the challenge expires
    pub fn new(code: impl Into<String>, now: DateTime<Utc>, ttl_minutes: i64) -> Self {
        Self {
            code: code.into(),
            attempts: 0,
            created_at: now,
            expires_at: expiry_after(now, ttl_minutes),
        }
    }

    /// Whether the challenge is expired at `now` (`now >= expires_at`)
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Records one failed verification attempt
    pub fn register_failed_attempt(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
    }

    /// Attempts left before lockout under `max_attempts` (0 once exhausted)
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }
}

/// `now + ttl_minutes`, clamped to the representable range
fn expiry_after(now: DateTime<Utc>, ttl_minutes: i64) -> DateTime<Utc> {
    Duration::try_minutes(ttl_minutes)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(if ttl_minutes < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}
