//! Example: Issuing and verifying OTP challenges with the in-memory store
//!
//! This example walks through issuance, a failed attempt, a successful
//! verification and a background sweep using the log sender.
//!
//! Run with: cargo run --example otp_store_demo -p mb_infra

use std::sync::Arc;
use std::time::Duration;

use mb_core::services::verification::{
    OtpStore, OtpSweeper, VerificationService, VerificationServiceConfig,
};
use mb_infra::{InMemoryOtpStore, LogOtpSender};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let store = Arc::new(InMemoryOtpStore::new());
    let sender = Arc::new(LogOtpSender::new());
    let service = VerificationService::new(
        store.clone(),
        sender.clone(),
        VerificationServiceConfig::default(),
    );

    let sweeper = OtpSweeper::new(store.clone(), Duration::from_secs(1)).spawn();

    let phone = "+15551234567";
    match service.send_code(phone).await {
        Ok(result) => println!("Sent code, valid for {}s", result.expires_in_seconds),
        Err(e) => {
            eprintln!("Failed to send code: {}", e);
            return;
        }
    }

    let outcome = service.verify_code(phone, "000000");
    println!("Wrong guess: {}", outcome.message());

    if let Some(code) = sender.last_code(phone) {
        let outcome = service.verify_code(phone, &code);
        println!("Correct code: {}", outcome.message());
    }

    store.issue("+15557654321", "999999", 0);
    tokio::time::sleep(Duration::from_millis(1200)).await;
    println!("Pending challenges after sweep: {}", store.len());

    sweeper.shutdown().await;
}
