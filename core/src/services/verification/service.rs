//! Main verification service implementation

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mb_shared::utils::phone::{
    is_valid_international_phone, mask_phone_number, normalize_phone_number,
};

use crate::domain::entities::pending_challenge::CODE_LENGTH;
use crate::errors::{DomainError, DomainResult, ValidationError};

use super::config::VerificationServiceConfig;
use super::traits::{OtpSender, OtpStore};
use super::types::{SendCodeResult, VerifyOutcome};

/// Verification service issuing and checking one-time passwords
///
/// Store reads and writes for a single issuance or verification run under
/// `gate`, so the read / compare / increment / delete sequence is atomic
/// within the process. Delivery happens outside the gate.
pub struct VerificationService<S: OtpStore + ?Sized, M: OtpSender + ?Sized> {
    /// Pending challenge storage
    store: Arc<S>,
    /// Outbound delivery channel
    sender: Arc<M>,
    /// Service configuration
    config: VerificationServiceConfig,
    gate: Mutex<()>,
}

impl<S: OtpStore + ?Sized, M: OtpSender + ?Sized> VerificationService<S, M> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `store` - Challenge store implementation
    /// * `sender` - Delivery channel implementation
    /// * `config` - Service configuration
    pub fn new(store: Arc<S>, sender: Arc<M>, config: VerificationServiceConfig) -> Self {
        Self {
            store,
            sender,
            config,
            gate: Mutex::new(()),
        }
    }

    /// The underlying challenge store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The service configuration
    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a new code for a phone number and relay it to the owner
    ///
    /// This method:
    /// 1. Validates and normalizes the phone number (E.164)
    /// 2. Generates a new code with the OS CSPRNG
    /// 3. Stores it, replacing any pending challenge for the number
    /// 4. Sends it through the delivery channel
    ///
    /// If delivery fails the challenge just issued is withdrawn.
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - Delivery details
    /// * `Err(DomainError)` - Validation or delivery failure
    pub async fn send_code(&self, phone: &str) -> DomainResult<SendCodeResult> {
        if phone.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "phoneNumber".to_string(),
            }
            .into());
        }

        let phone = normalize_phone_number(phone);
        let masked = mask_phone_number(&phone);
        if !is_valid_international_phone(&phone) {
            tracing::warn!(
                phone = %masked,
                event = "invalid_phone_format",
                "Rejected OTP request for malformed phone number"
            );
            return Err(ValidationError::InvalidFormat {
                field: "phoneNumber".to_string(),
            }
            .into());
        }

        let code = Self::generate_code();
        let issued = {
            let _gate = self.lock_gate();
            self.store
                .issue(&phone, &code, self.config.code_expiration_minutes);
            self.store.get(&phone)
        };
        let Some(issued) = issued else {
            tracing::error!(
                phone = %masked,
                event = "otp_issue_failed",
                ttl_minutes = self.config.code_expiration_minutes,
                "Issued verification code was not retrievable"
            );
            return Err(DomainError::Internal {
                message: "verification code expired at issuance".to_string(),
            });
        };

        tracing::info!(
            phone = %masked,
            event = "otp_issued",
            ttl_minutes = self.config.code_expiration_minutes,
            "Issued new verification code"
        );

        let message_id = match self.sender.send_otp(&phone, &code).await {
            Ok(message_id) => message_id,
            Err(e) => {
                self.withdraw(&phone, &code);
                tracing::error!(
                    phone = %masked,
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to deliver verification code"
                );
                return Err(DomainError::Delivery { message: e });
            }
        };

        tracing::debug!(
            phone = %masked,
            message_id = %message_id,
            event = "otp_delivered",
            "Verification code handed to delivery channel"
        );

        Ok(SendCodeResult {
            phone,
            message_id,
            issued_at: issued.created_at,
            expires_at: issued.expires_at,
            expires_in_seconds: (issued.expires_at - issued.created_at).num_seconds(),
        })
    }

    /// Verify a submitted code against the pending challenge
    ///
    /// Format is checked before any store lookup. The attempt limit is
    /// checked before comparing codes, and the failure that reaches the
    /// limit locks the challenge out immediately.
    pub fn verify_code(&self, phone: &str, otp: &str) -> VerifyOutcome {
        if phone.trim().is_empty() || otp.trim().is_empty() {
            return VerifyOutcome::MissingFields;
        }

        let phone = normalize_phone_number(phone);
        let masked = mask_phone_number(&phone);

        if !Self::is_valid_code_format(otp) {
            tracing::warn!(
                phone = %masked,
                event = "invalid_code_format",
                code_length = otp.len(),
                "Invalid verification code format provided"
            );
            return VerifyOutcome::InvalidFormat;
        }

        let _gate = self.lock_gate();

        let challenge = match self.store.get(&phone) {
            Some(challenge) => challenge,
            None => {
                tracing::info!(
                    phone = %masked,
                    event = "otp_not_found",
                    "No pending verification code for phone number"
                );
                return VerifyOutcome::NotFound;
            }
        };

        let max_attempts = self.config.max_attempts;
        if challenge.attempts >= max_attempts {
            self.store.delete(&phone);
            tracing::warn!(
                phone = %masked,
                event = "max_attempts_exceeded",
                "Maximum verification attempts exceeded for phone number"
            );
            return VerifyOutcome::TooManyAttempts;
        }

        if constant_time_eq(challenge.code.as_bytes(), otp.as_bytes()) {
            self.store.delete(&phone);
            tracing::info!(
                phone = %masked,
                event = "otp_verified_success",
                "Verification code successfully verified"
            );
            return VerifyOutcome::Verified;
        }

        if !self.store.register_failed_attempt(&phone) {
            tracing::info!(
                phone = %masked,
                event = "otp_not_found",
                "Verification code expired before the failed attempt was recorded"
            );
            return VerifyOutcome::NotFound;
        }

        let mut challenge = challenge;
        challenge.register_failed_attempt();
        let remaining_attempts = challenge.remaining_attempts(max_attempts);

        if remaining_attempts == 0 {
            self.store.delete(&phone);
            tracing::warn!(
                phone = %masked,
                event = "max_attempts_exceeded",
                attempts = challenge.attempts,
                "Maximum verification attempts exceeded for phone number"
            );
            return VerifyOutcome::TooManyAttempts;
        }

        tracing::warn!(
            phone = %masked,
            event = "otp_verification_failed",
            remaining_attempts = remaining_attempts,
            "Verification code mismatch"
        );
        VerifyOutcome::InvalidCode { remaining_attempts }
    }

    /// Generate a uniformly distributed numeric code using the OS CSPRNG
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(0..10u32.pow(CODE_LENGTH as u32));
        format!("{:0width$}", code, width = CODE_LENGTH)
    }

    /// Whether `code` is exactly `CODE_LENGTH` ASCII decimal digits
    pub fn is_valid_code_format(code: &str) -> bool {
        code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
    }

    /// Delete the challenge for `phone` only if it still holds `code`
    fn withdraw(&self, phone: &str, code: &str) {
        let _gate = self.lock_gate();
        let still_ours = self
            .store
            .get(phone)
            .map_or(false, |challenge| challenge.code == code);
        if still_ours {
            self.store.delete(phone);
        }
    }

    fn lock_gate(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
