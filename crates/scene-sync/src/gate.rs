use crate::ShutdownSignal;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// How a wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateOutcome {
    Satisfied,
    TimedOut,
    Cancelled,
}

impl GateOutcome {
    pub fn is_satisfied(self) -> bool {
        matches!(self, GateOutcome::Satisfied)
    }
}

/// Bounded polling primitive. Timeouts are per call, never cumulative.
#[derive(Debug, Clone)]
pub struct SyncGate {
    poll_interval: Duration,
    shutdown: ShutdownSignal,
}

impl SyncGate {
    pub fn new(poll_interval: Duration, shutdown: ShutdownSignal) -> Self {
        Self {
            poll_interval,
            shutdown,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn shutdown(&self) -> &ShutdownSignal {
        &self.shutdown
    }

    /// Poll `predicate` until it returns true, `timeout` elapses, or shutdown is requested.
    ///
    /// The shutdown flag is checked before every evaluation, so a cancelled wait
    /// returns within one poll interval. A predicate that already holds returns
    /// without sleeping. The predicate is evaluated at least once unless shutdown
    /// was already requested.
    pub fn await_predicate<F>(&self, mut predicate: F, timeout: Duration) -> GateOutcome
    where
        F: FnMut() -> bool,
    {
        let start = Instant::now();
        let mut polls = 0u32;
        loop {
            if self.shutdown.is_triggered() {
                tracing::debug!(polls, "sync wait cancelled");
                return GateOutcome::Cancelled;
            }
            polls += 1;
            if predicate() {
                tracing::trace!(
                    polls,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "sync predicate satisfied"
                );
                return GateOutcome::Satisfied;
            }
            let elapsed = start.elapsed();
            if elapsed >= timeout {
                tracing::debug!(
                    polls,
                    timeout_ms = timeout.as_millis() as u64,
                    "sync wait timed out"
                );
                return GateOutcome::TimedOut;
            }
            std::thread::sleep(self.poll_interval.min(timeout - elapsed));
        }
    }
}

impl Default for SyncGate {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, ShutdownSignal::new())
    }
}
