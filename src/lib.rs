//! Database readiness gate.
//!
//! Blocks until a MySQL or MongoDB database answers a lightweight probe,
//! retrying on a fixed linear schedule.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod resilience;

pub use config::WaitConfig;
pub use lifecycle::Shutdown;
pub use probe::{Backend, Probe, ProbeOutcome};
pub use resilience::{RetryDriver, RetryPolicy, WaitOutcome};
