//! Unit tests for the pending challenge entity

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::entities::pending_challenge::{
    PendingChallenge, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
};

fn issued_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

#[test]
fn test_new_challenge() {
    let now = issued_at();
    let challenge = PendingChallenge::new("123456", now, DEFAULT_EXPIRATION_MINUTES);

    assert_eq!(challenge.code, "123456");
    assert_eq!(challenge.attempts, 0);
    assert_eq!(challenge.created_at, now);
    assert_eq!(challenge.expires_at, now + Duration::minutes(5));
}

#[test]
fn test_expiry_boundary_is_inclusive() {
    let now = issued_at();
    let challenge = PendingChallenge::new("123456", now, 5);

    assert!(!challenge.is_expired_at(now));
    assert!(!challenge.is_expired_at(now + Duration::seconds(299)));
    assert!(challenge.is_expired_at(now + Duration::minutes(5)));
    assert!(challenge.is_expired_at(now + Duration::minutes(6)));
}

#[test]
fn test_zero_ttl_is_immediately_expired() {
    let now = issued_at();
    let challenge = PendingChallenge::new("123456", now, 0);
    assert!(challenge.is_expired_at(now));
}

#[test]
fn test_failed_attempts_and_remaining() {
    let mut challenge = PendingChallenge::new("123456", issued_at(), 5);
    assert_eq!(challenge.remaining_attempts(MAX_ATTEMPTS), 3);

    challenge.register_failed_attempt();
    assert_eq!(challenge.attempts, 1);
    assert_eq!(challenge.remaining_attempts(MAX_ATTEMPTS), 2);

    challenge.register_failed_attempt();
    challenge.register_failed_attempt();
    challenge.register_failed_attempt();
    assert_eq!(challenge.attempts, 4);
    assert_eq!(challenge.remaining_attempts(MAX_ATTEMPTS), 0);
}

#[test]
fn test_oversized_ttl_never_expires_instead_of_overflowing() {
    let now = issued_at();

    let challenge = PendingChallenge::new("123456", now, 1_000_000_000_000);
    assert_eq!(challenge.expires_at, DateTime::<Utc>::MAX_UTC);
    assert!(!challenge.is_expired_at(now + Duration::days(365)));

    let challenge = PendingChallenge::new("123456", now, i64::MAX);
    assert_eq!(challenge.expires_at, DateTime::<Utc>::MAX_UTC);
}

#[test]
fn test_hugely_negative_ttl_is_expired() {
    let now = issued_at();
    let challenge = PendingChallenge::new("123456", now, i64::MIN);
    assert!(challenge.is_expired_at(now));
}
