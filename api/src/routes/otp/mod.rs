//! OTP route handlers
//!
//! - `POST /api/v1/otp/send` issues a code and relays it to the phone
//! - `POST /api/v1/otp/verify` checks a submitted code

pub mod send_otp;
pub mod verify_otp;

use std::sync::Arc;

use mb_core::services::verification::{OtpSender, OtpStore, VerificationService};

/// Application state that holds shared services
pub struct AppState<S, M>
where
    S: OtpStore + ?Sized,
    M: OtpSender + ?Sized,
{
    pub verification_service: Arc<VerificationService<S, M>>,
}

impl<S, M> AppState<S, M>
where
    S: OtpStore + ?Sized,
    M: OtpSender + ?Sized,
{
    pub fn new(verification_service: Arc<VerificationService<S, M>>) -> Self {
        Self {
            verification_service,
        }
    }
}

pub use send_otp::send_otp;
pub use verify_otp::verify_otp;
