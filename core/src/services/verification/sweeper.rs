//! Background sweeper for expired OTP challenges
//!
//! Expired challenges are already dropped lazily when read; the sweeper only
//! bounds memory held by challenges that are never read again.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::traits::OtpStore;

const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Periodically removes expired challenges from an `OtpStore`
pub struct OtpSweeper<S: OtpStore + ?Sized + 'static> {
    store: Arc<S>,
    interval: Duration,
}

impl<S: OtpStore + ?Sized + 'static> OtpSweeper<S> {
    /// Create a sweeper running every `interval` (at least one second)
    pub fn new(store: Arc<S>, interval: Duration) -> Self {
        Self {
            store,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    /// Run a single sweep, returning the number of challenges removed
    pub fn run_once(&self) -> usize {
        let removed = self.store.sweep();
        if removed > 0 {
            info!(
                removed = removed,
                remaining = self.store.len(),
                event = "otp_sweep",
                "Removed expired verification codes"
            );
        } else {
            debug!(event = "otp_sweep", "No expired verification codes to remove");
        }
        removed
    }

    /// Start the sweeper as a background task
    ///
    /// The returned handle owns the task; call [`SweeperHandle::shutdown`]
    /// at process shutdown.
    pub fn spawn(self) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            info!(
                interval_seconds = self.interval.as_secs(),
                "OTP sweeper started"
            );

            let mut ticker = tokio::time::interval_at(
                tokio::time::Instant::now() + self.interval,
                self.interval,
            );
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        self.run_once();
                    }
                }
            }

            info!("OTP sweeper stopped");
        });

        SweeperHandle {
            shutdown: Some(shutdown_tx),
            task,
        }
    }
}

/// Handle to a running sweeper task
pub struct SweeperHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Whether the task has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Signal the task to stop and wait for it to exit
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.task).await {
            warn!(error = %e, "OTP sweeper task ended abnormally");
        }
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        if self.shutdown.is_some() {
            self.task.abort();
        }
    }
}
