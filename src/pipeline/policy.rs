//! Retry policy and backoff schedule.
//!
//! Overload failures back off with a 4x multiplier because provider
//! overload tends to persist; every other retryable kind uses the
//! standard 2x. Retrying an overloaded provider too soon only wastes
//! attempts.

use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;

use crate::error::ErrorKind;

const OVERLOAD_MULTIPLIER: f64 = 4.0;
const STANDARD_MULTIPLIER: f64 = 2.0;

/// Fixed retry constants: 3 retries (4 total tries), base 1s, cap 30s.
/// Not user-configurable at runtime.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub cap_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            cap_delay: Duration::from_millis(30_000),
        }
    }
}

/// Deterministic dual-track backoff over one attempt sequence.
///
/// Both tracks advance every attempt so the delay depends on the attempt
/// index, not on how many failures of each kind occurred; the failure
/// kind only picks which track's value applies.
pub struct BackoffSchedule {
    overload: ExponentialBackoff,
    standard: ExponentialBackoff,
    cap: Duration,
}

impl BackoffSchedule {
    pub fn new(policy: &RetryPolicy) -> Self {
        Self {
            overload: track(policy, OVERLOAD_MULTIPLIER),
            standard: track(policy, STANDARD_MULTIPLIER),
            cap: policy.cap_delay,
        }
    }

    /// Delay to sleep before the next attempt, given the kind of the
    /// failure that just occurred.
    pub fn next_delay(&mut self, kind: ErrorKind) -> Duration {
        let overload = self.overload.next_backoff().unwrap_or(self.cap);
        let standard = self.standard.next_backoff().unwrap_or(self.cap);
        match kind {
            ErrorKind::Overloaded => overload,
            _ => standard,
        }
    }
}

fn track(policy: &RetryPolicy, multiplier: f64) -> ExponentialBackoff {
    ExponentialBackoff {
        // current_interval must match initial_interval explicitly: the
        // struct-update default leaves it at the crate's 500ms.
        current_interval: policy.base_delay,
        initial_interval: policy.base_delay,
        max_interval: policy.cap_delay,
        multiplier,
        // Deterministic delays; the pipeline is the only consumer of the
        // provider per call, so jitter buys nothing.
        randomization_factor: 0.0,
        max_elapsed_time: None, // We control retries manually
        ..Default::default()
    }
}
