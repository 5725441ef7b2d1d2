//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config / probes / retry driver
//!     → tracing events (structured fields: attempt, tries, sleep_secs, error)
//!     → logging.rs subscriber
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - stdout carries only the success line; all diagnostics go to stderr
//! - Log level configurable via `RUST_LOG`

pub mod logging;
