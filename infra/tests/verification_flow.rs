//! Integration tests for the verification protocol over the in-memory store

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use mb_core::services::clock::ManualClock;
use mb_core::services::verification::{
    OtpStore, VerificationService, VerificationServiceConfig, VerifyOutcome,
};
use mb_infra::{InMemoryOtpStore, LogOtpSender};

const PHONE: &str = "+15551234567";

struct Harness {
    clock: Arc<ManualClock>,
    store: Arc<InMemoryOtpStore>,
    sender: Arc<LogOtpSender>,
    service: VerificationService<InMemoryOtpStore, LogOtpSender>,
}

fn harness() -> Harness {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
    ));
    let store = Arc::new(InMemoryOtpStore::with_clock(clock.clone()));
    let sender = Arc::new(LogOtpSender::new());
    let service = VerificationService::new(
        store.clone(),
        sender.clone(),
        VerificationServiceConfig::default(),
    );
    Harness {
        clock,
        store,
        sender,
        service,
    }
}

#[test]
fn test_documented_scenario() {
    let h = harness();

    h.store.issue(PHONE, "123456", 5);
    let challenge = h.store.get(PHONE).unwrap();
    assert_eq!(challenge.code, "123456");
    assert_eq!(challenge.attempts, 0);

    let outcome = h.service.verify_code(PHONE, "000000");
    assert_eq!(outcome.message(), "Invalid OTP. 2 attempts remaining.");
    assert_eq!(h.store.get(PHONE).unwrap().attempts, 1);

    assert_eq!(h.service.verify_code(PHONE, "123456"), VerifyOutcome::Verified);
    assert!(h.store.get(PHONE).is_none());
}

#[test]
fn test_lockout_sequence() {
    let h = harness();
    h.store.issue(PHONE, "123456", 5);

    let outcomes: Vec<VerifyOutcome> = ["000000", "000001", "000002"]
        .iter()
        .map(|code| h.service.verify_code(PHONE, code))
        .collect();

    assert_eq!(
        outcomes,
        vec![
            VerifyOutcome::InvalidCode { remaining_attempts: 2 },
            VerifyOutcome::InvalidCode { remaining_attempts: 1 },
            VerifyOutcome::TooManyAttempts,
        ]
    );
    assert!(h.store.is_empty());
    assert_eq!(h.service.verify_code(PHONE, "123456"), VerifyOutcome::NotFound);
}

#[test]
fn test_expiry_and_no_resurrection() {
    let h = harness();
    h.store.issue(PHONE, "123456", 5);

    h.clock.advance(Duration::minutes(5));
    assert_eq!(h.service.verify_code(PHONE, "123456"), VerifyOutcome::NotFound);

    h.clock.advance(Duration::minutes(-4));
    assert_eq!(h.service.verify_code(PHONE, "123456"), VerifyOutcome::NotFound);
}

#[test]
fn test_reissue_invalidates_old_code() {
    let h = harness();
    h.store.issue(PHONE, "111111", 5);
    h.store.issue(PHONE, "222222", 5);

    assert_eq!(
        h.service.verify_code(PHONE, "111111"),
        VerifyOutcome::InvalidCode { remaining_attempts: 2 }
    );
    assert_eq!(h.service.verify_code(PHONE, "222222"), VerifyOutcome::Verified);
}

#[test]
fn test_format_rejected_before_lookup() {
    let h = harness();
    h.store.issue(PHONE, "123456", 5);

    assert_eq!(h.service.verify_code(PHONE, "12345"), VerifyOutcome::InvalidFormat);
    assert_eq!(h.service.verify_code(PHONE, "abcdef"), VerifyOutcome::InvalidFormat);
    assert_eq!(h.store.get(PHONE).unwrap().attempts, 0);

    assert_eq!(
        h.service.verify_code("+15550000000", "abcdef"),
        VerifyOutcome::InvalidFormat
    );
}

#[tokio::test]
async fn test_send_then_verify_round() {
    let h = harness();

    let sent = h.service.send_code("+1 555 123 4567").await.unwrap();
    assert_eq!(sent.phone, PHONE);
    assert_eq!(sent.expires_in_seconds, 300);

    let code = h.sender.last_code(PHONE).unwrap();
    assert_eq!(h.service.verify_code("+1 (555) 123-4567", &code), VerifyOutcome::Verified);
    assert_eq!(h.service.verify_code(PHONE, &code), VerifyOutcome::NotFound);
}

#[tokio::test]
async fn test_delivery_failure_leaves_no_challenge() {
    let h = harness();
    h.sender.set_simulate_failure(true);

    assert!(h.service.send_code(PHONE).await.is_err());
    assert!(h.store.is_empty());
}

#[test]
fn test_concurrent_wrong_guesses_never_exceed_cap() {
    let h = harness();
    h.store.issue(PHONE, "123456", 5);
    let service = Arc::new(h.service);

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let service = service.clone();
            std::thread::spawn(move || service.verify_code(PHONE, &format!("00000{}", i)))
        })
        .collect();
    let outcomes: Vec<VerifyOutcome> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let invalid = outcomes
        .iter()
        .filter(|o| matches!(o, VerifyOutcome::InvalidCode { .. }))
        .count();
    let locked = outcomes
        .iter()
        .filter(|o| **o == VerifyOutcome::TooManyAttempts)
        .count();
    let not_found = outcomes
        .iter()
        .filter(|o| **o == VerifyOutcome::NotFound)
        .count();

    assert_eq!(invalid, 2);
    assert_eq!(locked, 1);
    assert_eq!(not_found, 3);
    assert!(h.store.is_empty());
}
