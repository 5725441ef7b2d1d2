//! Retry driver.
//!
//! # State Transitions
//! ```text
//! Probing(i) → Ready:            probe succeeded
//! Probing(i) → Fatal:            probe reported a fatal error (no sleep)
//! Probing(i) → Probing(i + 1):   retryable failure, sleep 3*i + 1 seconds
//! Probing(i) → Exhausted:        retryable failure on the last attempt
//! Probing(i) → Interrupted:      shutdown signal while the probe is in flight
//! sleeping   → Interrupted:      shutdown signal during the wait
//! ```
//!
//! # Design Decisions
//! - A budget of N allows N - 1 attempts; a budget of 0 or 1 still gets one attempt
//! - No sleep after the final attempt
//! - The driver knows nothing about backends; it only sees `ProbeOutcome`

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time;

use crate::probe::{Probe, ProbeError, ProbeOutcome};
use crate::resilience::backoff::linear_backoff;

/// Exit code for a successful wait.
pub const EXIT_READY: u8 = 0;
/// Exit code for fatal configuration or environment errors.
pub const EXIT_FATAL: u8 = 1;
/// Exit code when every attempt failed.
pub const EXIT_EXHAUSTED: u8 = 2;
/// Exit code when a signal interrupted the wait (128 + SIGINT).
pub const EXIT_INTERRUPTED: u8 = 130;

/// Attempt budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Configured budget (`TRIES`).
    pub tries: u32,
}

impl RetryPolicy {
    pub fn new(tries: u32) -> Self {
        Self { tries }
    }

    /// Number of probe attempts this budget allows.
    pub fn max_attempts(&self) -> u32 {
        self.tries.saturating_sub(1).max(1)
    }
}

/// Terminal state of a wait.
#[derive(Debug, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The backend answered on attempt `attempts`.
    Ready { attempts: u32 },
    /// A fatal error stopped the wait on attempt `attempt`.
    Fatal { attempt: u32, error: ProbeError },
    /// All attempts failed.
    Exhausted { attempts: u32 },
    /// A shutdown signal arrived during or right after attempt `attempts`.
    Interrupted { attempts: u32 },
}

impl WaitOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            WaitOutcome::Ready { .. } => EXIT_READY,
            WaitOutcome::Fatal { .. } => EXIT_FATAL,
            WaitOutcome::Exhausted { .. } => EXIT_EXHAUSTED,
            WaitOutcome::Interrupted { .. } => EXIT_INTERRUPTED,
        }
    }
}

/// Resolves once a stop is requested; never resolves if the sender is gone.
async fn stop_requested(rx: &mut broadcast::Receiver<()>) {
    if let Err(RecvError::Closed) = rx.recv().await {
        std::future::pending::<()>().await;
    }
}

/// Repeatedly probes until the backend is ready or the budget runs out.
pub struct RetryDriver<P> {
    probe: P,
    policy: RetryPolicy,
}

impl<P: Probe> RetryDriver<P> {
    pub fn new(probe: P, policy: RetryPolicy) -> Self {
        Self { probe, policy }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Run the wait loop to a terminal state.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) -> WaitOutcome {
        let max_attempts = self.policy.max_attempts();
        let tries = self.policy.tries;

        for attempt in 1..=max_attempts {
            tracing::debug!(attempt, tries, backend = %self.probe.target(), "Probing");

            let outcome = tokio::select! {
                outcome = self.probe.probe() => outcome,
                _ = stop_requested(&mut shutdown) => {
                    tracing::debug!(attempt, "Abandoning probe in flight");
                    return WaitOutcome::Interrupted { attempts: attempt };
                }
            };

            let error = match outcome {
                ProbeOutcome::Ready => {
                    tracing::info!(attempt, "Backend is ready");
                    return WaitOutcome::Ready { attempts: attempt };
                }
                ProbeOutcome::Fatal(error) => {
                    return WaitOutcome::Fatal { attempt, error };
                }
                ProbeOutcome::Retryable(error) => error,
            };

            if attempt == max_attempts {
                tracing::warn!(attempt, tries, error = %error, "Try ({}/{}) error: {}", attempt, tries, error);
                break;
            }

            let wait = linear_backoff(attempt);
            tracing::warn!(
                attempt,
                tries,
                sleep_secs = wait.as_secs(),
                error = %error,
                "Try ({}/{}) sleep {} seconds error: {}",
                attempt,
                tries,
                wait.as_secs(),
                error
            );

            tokio::select! {
                _ = time::sleep(wait) => {}
                _ = stop_requested(&mut shutdown) => {
                    return WaitOutcome::Interrupted { attempts: attempt };
                }
            }
        }

        WaitOutcome::Exhausted {
            attempts: max_attempts,
        }
    }
}
