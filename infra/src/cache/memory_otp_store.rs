//! In-memory OTP challenge store
//!
//! Holds one pending challenge per phone number in a process-local map:
//! - Lazy expiry on read, plus an explicit `sweep`
//! - A single mutex around the map
//! - Injected clock so expiry can be driven in tests
//!
//! Entries do not survive a restart and are not shared between processes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use mb_core::domain::entities::PendingChallenge;
use mb_core::services::clock::{Clock, SystemClock};
use mb_core::services::verification::OtpStore;
use mb_shared::utils::phone::mask_phone_number;

/// Process-local `OtpStore`
pub struct InMemoryOtpStore {
    challenges: Mutex<HashMap<String, PendingChallenge>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryOtpStore {
    /// Create an empty store on wall-clock time
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store using `clock` for expiry
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            challenges: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Drop every challenge
    pub fn clear(&self) {
        self.lock().clear();
    }

    // The map holds plain data, so a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, PendingChallenge>> {
        self.challenges.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes `phone` if its challenge is expired; returns whether it was
    fn evict_if_expired(
        challenges: &mut HashMap<String, PendingChallenge>,
        phone: &str,
        now: chrono::DateTime<chrono::Utc>,
    ) -> bool {
        let expired = challenges
            .get(phone)
            .map_or(false, |challenge| challenge.is_expired_at(now));
        if expired {
            challenges.remove(phone);
            debug!(
                phone = %mask_phone_number(phone),
                event = "otp_expired",
                "Dropped expired verification code on read"
            );
        }
        expired
    }
}

impl Default for InMemoryOtpStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OtpStore for InMemoryOtpStore {
    fn issue(&self, phone: &str, code: &str, ttl_minutes: i64) {
        let challenge = PendingChallenge::new(code, self.clock.now(), ttl_minutes);
        self.lock().insert(phone.to_string(), challenge);
    }

    fn get(&self, phone: &str) -> Option<PendingChallenge> {
        let now = self.clock.now();
        let mut challenges = self.lock();
        if Self::evict_if_expired(&mut challenges, phone, now) {
            return None;
        }
        challenges.get(phone).cloned()
    }

    fn register_failed_attempt(&self, phone: &str) -> bool {
        let now = self.clock.now();
        let mut challenges = self.lock();
        if Self::evict_if_expired(&mut challenges, phone, now) {
            return false;
        }
        match challenges.get_mut(phone) {
            Some(challenge) => {
                challenge.register_failed_attempt();
                true
            }
            None => false,
        }
    }

    fn delete(&self, phone: &str) {
        self.lock().remove(phone);
    }

    fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut challenges = self.lock();
        let before = challenges.len();
        challenges.retain(|_, challenge| !challenge.is_expired_at(now));
        before - challenges.len()
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}
