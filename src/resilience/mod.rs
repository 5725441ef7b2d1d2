//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Each attempt:
//!     → probe (document backend wraps its calls in timeouts.rs)
//!     → retries.rs classifies the outcome
//!     → on retryable failure: backoff.rs yields the wait, 3*i + 1 seconds
//! ```
//!
//! # Design Decisions
//! - Fixed linear schedule, no jitter; runs are reproducible
//! - Retry budget is counted in attempts, not wall time
//! - Only the document backend carries an explicit deadline

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use retries::{RetryDriver, RetryPolicy, WaitOutcome};
