//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `delivery` - Outbound OTP delivery channel (log, WhatsApp)
//! - `environment` - Environment detection and logging configuration
//! - `otp` - OTP lifetime, attempt limit and sweep cadence
//! - `server` - HTTP server binding

pub mod delivery;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use delivery::{DeliveryConfig, DeliveryProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// OTP policy configuration
    pub otp: OtpConfig,

    /// Outbound delivery configuration
    pub delivery: DeliveryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            otp: OtpConfig::default(),
            delivery: DeliveryConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Reads `.env` first when present; unset or unparseable variables fall
    /// back to their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("ENV"))
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        let mut logging = LoggingConfig::for_environment(environment);
        if let Some(level) = lookup("LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            environment,
            server: ServerConfig::from_lookup(&lookup),
            otp: OtpConfig::from_lookup(&lookup),
            delivery: DeliveryConfig::from_lookup(&lookup),
            logging,
        }
    }
}

/// Parse an optional variable, falling back to `default` when unset or invalid
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
