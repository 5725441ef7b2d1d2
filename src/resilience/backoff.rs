//! Linear backoff between probe attempts.

use std::time::Duration;

/// Seconds to wait after failed attempt `attempt` (1-based): `3 * attempt + 1`.
///
/// Deterministic; no jitter.
pub fn linear_backoff_secs(attempt: u32) -> u64 {
    3 * u64::from(attempt) + 1
}

/// [`linear_backoff_secs`] as a `Duration`.
pub fn linear_backoff(attempt: u32) -> Duration {
    Duration::from_secs(linear_backoff_secs(attempt))
}
