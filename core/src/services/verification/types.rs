//! Types for verification service results

use chrono::{DateTime, Utc};

/// Result of issuing and delivering a code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// Normalized phone number the challenge is keyed under
    pub phone: String,
    /// The delivery provider's message ID
    pub message_id: String,
    /// When the code was issued
    pub issued_at: DateTime<Utc>,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Seconds the code stays valid
    pub expires_in_seconds: i64,
}

/// Terminal outcome of one verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Code matched; the challenge has been consumed
    Verified,
    /// Phone number or code was blank
    MissingFields,
    /// Code is not exactly six decimal digits
    InvalidFormat,
    /// No challenge, or it expired
    NotFound,
    /// Attempt limit reached; the challenge has been deleted
    TooManyAttempts,
    /// Code did not match; the challenge remains with one more failed attempt
    InvalidCode { remaining_attempts: u32 },
}

impl VerifyOutcome {
    /// Whether the phone number was verified
    pub fn is_success(&self) -> bool {
        matches!(self, VerifyOutcome::Verified)
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            VerifyOutcome::Verified => "verified",
            VerifyOutcome::MissingFields => "missing_fields",
            VerifyOutcome::InvalidFormat => "invalid_format",
            VerifyOutcome::NotFound => "otp_not_found",
            VerifyOutcome::TooManyAttempts => "too_many_attempts",
            VerifyOutcome::InvalidCode { .. } => "invalid_otp",
        }
    }

    /// User-facing message
    pub fn message(&self) -> String {
        match self {
            VerifyOutcome::Verified => "OTP verified successfully".to_string(),
            VerifyOutcome::MissingFields => "Phone number and OTP are required".to_string(),
            VerifyOutcome::InvalidFormat => "OTP must be 6 digits".to_string(),
            VerifyOutcome::NotFound => {
                "OTP not found or expired. Please request a new OTP.".to_string()
            }
            VerifyOutcome::TooManyAttempts => {
                "Too many failed attempts. Please request a new OTP.".to_string()
            }
            VerifyOutcome::InvalidCode { remaining_attempts } => format!(
                "Invalid OTP. {} attempt{} remaining.",
                remaining_attempts,
                if *remaining_attempts == 1 { "" } else { "s" }
            ),
        }
    }

    /// Remaining attempts, reported only for a mismatch
    pub fn remaining_attempts(&self) -> Option<u32> {
        match self {
            VerifyOutcome::InvalidCode { remaining_attempts } => Some(*remaining_attempts),
            _ => None,
        }
    }
}
