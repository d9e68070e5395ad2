//! Configuration for the verification service

use mb_shared::config::OtpConfig;

use crate::domain::entities::pending_challenge::{DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before an issued code expires
    pub code_expiration_minutes: i64,
    /// Failed verification attempts allowed before lockout
    pub max_attempts: u32,
    /// Seconds between sweeps of expired challenges
    pub sweep_interval_seconds: u64,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: MAX_ATTEMPTS,
            sweep_interval_seconds: 300,
        }
    }
}

impl From<&OtpConfig> for VerificationServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_expiration_minutes: config.ttl_minutes,
            max_attempts: config.max_attempts,
            sweep_interval_seconds: config.sweep_interval_seconds,
        }
    }
}
