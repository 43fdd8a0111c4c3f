//! Resilient attempt loop around the provider adapter.
//!
//! The transition table is a pure function kept separate from the HTTP
//! code so the retry-vs-abort decisions are testable on their own.

use tracing::{debug, warn};

use crate::error::ErrorKind;
use crate::prompt::PromptPlan;
use crate::provider::{ProviderAdapter, ProviderResponse};

use super::policy::{BackoffSchedule, RetryPolicy};

/// Attempt loop states. `Attempting(n)` counts from 0; the three
/// terminal states are mutually exclusive per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Attempting(u32),
    Succeeded,
    Exhausted,
    Aborted,
}

impl AttemptState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AttemptState::Attempting(_))
    }
}

/// What a single attempt produced, reduced to what the transition table
/// needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeClass {
    Success,
    Retryable,
    Fatal,
}

/// The transition table. Total: terminal states absorb any further
/// outcome. `max_attempts` is inclusive, so `max_attempts + 1` tries
/// happen before `Exhausted`.
pub fn transition(state: AttemptState, outcome: OutcomeClass, max_attempts: u32) -> AttemptState {
    match (state, outcome) {
        (AttemptState::Attempting(_), OutcomeClass::Success) => AttemptState::Succeeded,
        (AttemptState::Attempting(_), OutcomeClass::Fatal) => AttemptState::Aborted,
        (AttemptState::Attempting(n), OutcomeClass::Retryable) if n >= max_attempts => {
            AttemptState::Exhausted
        }
        (AttemptState::Attempting(n), OutcomeClass::Retryable) => AttemptState::Attempting(n + 1),
        (terminal, _) => terminal,
    }
}

/// How the attempt loop ended.
#[derive(Debug)]
pub enum ExecutionOutcome {
    Completed(ProviderResponse),
    /// Retries exhausted or a fatal failure; the pipeline degrades to
    /// fallback content instead of surfacing this to the caller.
    Degraded {
        state: AttemptState,
        kind: ErrorKind,
    },
}

/// Run the attempt loop against the adapter.
///
/// Attempts are strictly sequential. Before every attempt after the
/// first, the provider handle is discarded so corrupted connection state
/// cannot carry over. Success short-circuits with no sleep and no
/// recreation; fatal failures abort immediately, even on attempt 0.
pub async fn execute<A>(
    adapter: &A,
    plan: &PromptPlan,
    policy: &RetryPolicy,
) -> ExecutionOutcome
where
    A: ProviderAdapter + ?Sized,
{
    let mut schedule = BackoffSchedule::new(policy);
    let mut attempt = 0u32;

    loop {
        if attempt > 0 {
            debug!(attempt, "recreating provider handle before retry");
            adapter.reset_handle();
        }

        let outcome = adapter.generate(plan).await;
        let class = match &outcome {
            Ok(_) => OutcomeClass::Success,
            Err(e) if e.is_retryable() => OutcomeClass::Retryable,
            Err(_) => OutcomeClass::Fatal,
        };

        let next = transition(AttemptState::Attempting(attempt), class, policy.max_attempts);
        match (next, outcome) {
            (AttemptState::Succeeded, Ok(response)) => {
                debug!(attempt, "provider call succeeded");
                return ExecutionOutcome::Completed(response);
            }
            (AttemptState::Aborted, Err(err)) => {
                warn!(attempt, kind = %err.kind(), error = %err, "fatal provider failure, aborting");
                return ExecutionOutcome::Degraded {
                    state: AttemptState::Aborted,
                    kind: err.kind(),
                };
            }
            (AttemptState::Exhausted, Err(err)) => {
                warn!(attempt, kind = %err.kind(), error = %err, "retry budget exhausted");
                return ExecutionOutcome::Degraded {
                    state: AttemptState::Exhausted,
                    kind: err.kind(),
                };
            }
            (AttemptState::Attempting(next_attempt), Err(err)) => {
                let delay = schedule.next_delay(err.kind());
                warn!(
                    attempt,
                    kind = %err.kind(),
                    delay_ms = delay.as_millis() as u64,
                    "transient provider failure, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt = next_attempt;
            }
            (state, outcome) => {
                // transition pairs Succeeded only with Ok and the
                // failure states only with Err.
                unreachable!("state {state:?} disagrees with outcome {:?}", outcome.is_ok());
            }
        }
    }
}
