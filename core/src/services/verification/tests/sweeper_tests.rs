//! Unit tests for the background sweeper

use chrono::Duration as ChronoDuration;
use std::sync::Arc;
use std::time::Duration;

use crate::services::verification::{OtpStore, OtpSweeper};

use super::mocks::MockOtpStore;

#[test]
fn test_run_once_removes_only_expired() {
    let store = Arc::new(MockOtpStore::new());
    store.issue("+15550000001", "111111", 1);
    store.issue("+15550000002", "222222", 10);

    store.clock.advance(ChronoDuration::minutes(2));

    let sweeper = OtpSweeper::new(store.clone(), Duration::from_secs(300));
    assert_eq!(sweeper.run_once(), 1);
    assert_eq!(store.len(), 1);
    assert!(store.get("+15550000002").is_some());

    // Nothing left to sweep
    assert_eq!(sweeper.run_once(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_spawned_sweeper_runs_on_interval() {
    let store = Arc::new(MockOtpStore::new());
    store.issue("+15550000001", "111111", 1);
    store.clock.advance(ChronoDuration::minutes(2));

    let handle = OtpSweeper::new(store.clone(), Duration::from_secs(60)).spawn();

    // First tick is one interval after start
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(store.sweep_calls(), 0);
    assert_eq!(store.len(), 1);

    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(store.sweep_calls(), 1);
    assert!(store.is_empty());

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(store.sweep_calls(), 3);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_sweeper() {
    let store = Arc::new(MockOtpStore::new());
    let handle = OtpSweeper::new(store.clone(), Duration::from_secs(60)).spawn();
    assert!(!handle.is_finished());

    handle.shutdown().await;

    tokio::time::sleep(Duration::from_secs(600)).await;
    assert_eq!(store.sweep_calls(), 0);
}
