//! Cache module for pending OTP challenges
//!
//! Provides the process-local challenge store. A shared store with native
//! per-key expiry would implement the same `OtpStore` contract.

pub mod memory_otp_store;

#[cfg(test)]
mod tests;

pub use memory_otp_store::InMemoryOtpStore;
