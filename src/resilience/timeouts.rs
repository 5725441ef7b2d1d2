//! Timeout enforcement.
//!
//! # Responsibilities
//! - Build a deadline from a fixed budget
//! - Run probe steps against that deadline
//!
//! # Design Decisions
//! - Uses Tokio's timer; several steps may share one deadline
//! - Building a deadline can fail (no timer, overflow); callers treat that as fatal
//! - Timeout errors are distinct from other errors

use std::future::IntoFuture;
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::time::{timeout_at, Instant};

/// Deadline for the document backend's connect and list calls.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from deadline handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeoutError {
    #[error("no Tokio runtime available to drive timers")]
    NoRuntime,

    #[error("deadline {0:?} from now is out of range")]
    OutOfRange(Duration),

    #[error("deadline of {0:?} elapsed")]
    Elapsed(Duration),
}

/// A point in time shared by several operations.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    /// Create a deadline `budget` from now.
    pub fn after(budget: Duration) -> Result<Self, TimeoutError> {
        Handle::try_current().map_err(|_| TimeoutError::NoRuntime)?;
        let at = Instant::now()
            .checked_add(budget)
            .ok_or(TimeoutError::OutOfRange(budget))?;
        Ok(Self { at, budget })
    }

    /// Run `fut`, failing if the deadline passes first.
    pub async fn run<F: IntoFuture>(&self, fut: F) -> Result<F::Output, TimeoutError> {
        timeout_at(self.at, fut)
            .await
            .map_err(|_| TimeoutError::Elapsed(self.budget))
    }
}
