//! OTP policy configuration

use serde::{Deserialize, Serialize};

/// Default minutes before an issued OTP expires
pub const DEFAULT_TTL_MINUTES: i64 = 5;

/// Longest accepted OTP lifetime (one day)
pub const MAX_TTL_MINUTES: i64 = 24 * 60;

/// Default number of failed attempts before lockout
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default seconds between expired-challenge sweeps
pub const DEFAULT_SWEEP_INTERVAL_SECONDS: u64 = 300;

/// OTP lifetime and retry policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes an issued OTP stays valid
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: i64,

    /// Failed verification attempts allowed per challenge
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Seconds between background sweeps of expired challenges
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: DEFAULT_TTL_MINUTES,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            sweep_interval_seconds: DEFAULT_SWEEP_INTERVAL_SECONDS,
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            ttl_minutes: Some(super::parse_or(lookup, "OTP_TTL_MINUTES", DEFAULT_TTL_MINUTES))
                .filter(|ttl| (1..=MAX_TTL_MINUTES).contains(ttl))
                .unwrap_or(DEFAULT_TTL_MINUTES),
            max_attempts: Some(super::parse_or(lookup, "OTP_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS))
                .filter(|max| *max > 0)
                .unwrap_or(DEFAULT_MAX_ATTEMPTS),
            sweep_interval_seconds: super::parse_or(
                lookup,
                "OTP_SWEEP_INTERVAL_SECONDS",
                DEFAULT_SWEEP_INTERVAL_SECONDS,
            ),
        }
    }
}

fn default_ttl_minutes() -> i64 {
    DEFAULT_TTL_MINUTES
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_sweep_interval_seconds() -> u64 {
    DEFAULT_SWEEP_INTERVAL_SECONDS
}
