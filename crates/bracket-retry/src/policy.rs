//! Retry policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Attempt budget and spacing for one retry loop.
///
/// The interval is fixed: the loops this replaces polled a re-rendering
/// page at a constant cadence, and growing the delay would only slow down
/// detection of a change that is already cheap to check for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Values of 0 are treated as 1;
    /// an attempt budget that allows no attempt has no meaningful result
    /// to report.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub interval: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
        }
    }

    /// Budget from attempt count and millisecond spacing.
    pub fn from_millis(max_attempts: u32, interval_ms: u64) -> Self {
        Self::new(max_attempts, Duration::from_millis(interval_ms))
    }

    /// Worst-case wall-clock time the loop can spend sleeping.
    pub fn max_wait(&self) -> Duration {
        self.interval * self.max_attempts.saturating_sub(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        // 10 attempts at 250ms: the 2-3 second window a panel re-render
        // normally completes within.
        Self::new(10, Duration::from_millis(250))
    }
}
