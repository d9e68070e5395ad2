//! Verification service module for phone-number OTP challenges
//!
//! This module provides the complete one-time-password workflow:
//! - The `OtpStore` contract holding one pending challenge per phone number
//! - Code generation and outbound delivery through an `OtpSender`
//! - The verification protocol with expiry and attempt limiting
//! - A background sweeper removing abandoned, expired challenges

mod config;
mod service;
mod sweeper;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use sweeper::{OtpSweeper, SweeperHandle};
pub use traits::{OtpSender, OtpStore};
pub use types::{SendCodeResult, VerifyOutcome};
