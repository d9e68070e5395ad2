//! Tests for the in-memory OTP store

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use mb_core::services::clock::{Clock, ManualClock};
use mb_core::services::verification::OtpStore;

use crate::cache::InMemoryOtpStore;

const PHONE: &str = "+15551234567";

fn store_at_fixed_time() -> (InMemoryOtpStore, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
    ));
    (InMemoryOtpStore::with_clock(clock.clone()), clock)
}

#[test]
fn test_issue_then_get() {
    let (store, clock) = store_at_fixed_time();
    store.issue(PHONE, "123456", 5);

    let challenge = store.get(PHONE).unwrap();
    assert_eq!(challenge.code, "123456");
    assert_eq!(challenge.attempts, 0);
    assert_eq!(challenge.expires_at, clock.now() + Duration::minutes(5));

    clock.advance(Duration::seconds(299));
    assert!(store.get(PHONE).is_some());
}

#[test]
fn test_get_unknown_phone() {
    let (store, _) = store_at_fixed_time();
    assert!(store.get(PHONE).is_none());
    assert!(store.is_empty());
}

#[test]
fn test_expired_read_deletes_permanently() {
    let (store, clock) = store_at_fixed_time();
    store.issue(PHONE, "123456", 5);

    clock.advance(Duration::minutes(5));
    assert!(store.get(PHONE).is_none());
    assert_eq!(store.len(), 0);

    // Rewinding time does not resurrect the entry
    clock.advance(Duration::minutes(-5));
    assert!(store.get(PHONE).is_none());
}

#[test]
fn test_issue_replaces_pending_challenge() {
    let (store, clock) = store_at_fixed_time();
    store.issue(PHONE, "111111", 5);
    assert!(store.register_failed_attempt(PHONE));

    clock.advance(Duration::minutes(1));
    store.issue(PHONE, "222222", 5);

    let challenge = store.get(PHONE).unwrap();
    assert_eq!(challenge.code, "222222");
    assert_eq!(challenge.attempts, 0);
    assert_eq!(challenge.expires_at, clock.now() + Duration::minutes(5));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_register_failed_attempt() {
    let (store, _) = store_at_fixed_time();
    assert!(!store.register_failed_attempt(PHONE));

    store.issue(PHONE, "123456", 5);
    assert!(store.register_failed_attempt(PHONE));
    assert!(store.register_failed_attempt(PHONE));
    assert_eq!(store.get(PHONE).unwrap().attempts, 2);
}

#[test]
fn test_register_failed_attempt_on_expired_challenge() {
    let (store, clock) = store_at_fixed_time();
    store.issue(PHONE, "123456", 5);
    clock.advance(Duration::minutes(10));

    assert!(!store.register_failed_attempt(PHONE));
    assert!(store.is_empty());
}

#[test]
fn test_delete_is_idempotent() {
    let (store, _) = store_at_fixed_time();
    store.issue(PHONE, "123456", 5);

    store.delete(PHONE);
    assert!(store.get(PHONE).is_none());
    store.delete(PHONE);
    store.delete("+15550000000");
}

#[test]
fn test_sweep_removes_only_expired() {
    let (store, clock) = store_at_fixed_time();
    store.issue("+15550000001", "111111", 1);
    store.issue("+15550000002", "222222", 3);
    store.issue("+15550000003", "333333", 10);

    assert_eq!(store.sweep(), 0);

    clock.advance(Duration::minutes(3));
    assert_eq!(store.sweep(), 2);
    assert_eq!(store.len(), 1);
    assert!(store.get("+15550000003").is_some());
}

#[test]
fn test_clear() {
    let (store, _) = store_at_fixed_time();
    store.issue("+15550000001", "111111", 5);
    store.issue("+15550000002", "222222", 5);

    store.clear();
    assert!(store.is_empty());
}

#[test]
fn test_concurrent_attempts_are_counted() {
    let (store, _) = store_at_fixed_time();
    let store = Arc::new(store);
    store.issue(PHONE, "123456", 5);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            std::thread::spawn(move || {
                for _ in 0..25 {
                    store.register_failed_attempt(PHONE);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.get(PHONE).unwrap().attempts, 200);
}

#[test]
fn test_issue_with_oversized_ttl_does_not_panic() {
    let (store, clock) = store_at_fixed_time();

    store.issue(PHONE, "123456", 1_000_000_000_000);
    store.issue("+447700900123", "654321", i64::MAX);

    clock.advance(Duration::days(3650));
    assert_eq!(store.get(PHONE).unwrap().code, "123456");
    assert!(store.get("+447700900123").is_some());
}
