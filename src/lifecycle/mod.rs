//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     broadcast → retry driver abandons the probe or wait in progress → exit 130
//! ```
//!
//! # Design Decisions
//! - A probe in flight is dropped on shutdown; its connection goes with it
//! - Without a signal the process always ends in one of its terminal states

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
