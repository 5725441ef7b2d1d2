//! Probe outcome and error definitions.

use thiserror::Error;

/// Errors that can occur while probing a backend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProbeError {
    /// Could not open a connection to the server.
    #[error("error connect to '{target}': {reason}")]
    Connect { target: String, reason: String },

    /// The metadata query failed.
    #[error("query '{query}': {reason}")]
    Query { query: String, reason: String },

    /// A result row could not be decoded.
    #[error("for query '{query}', cannot read table: {reason}")]
    Row { query: String, reason: String },

    /// The document client could not be constructed.
    #[error("mongodb connect to '{host}': {reason}")]
    Client { host: String, reason: String },

    /// The probe did not finish before its deadline.
    #[error("no response within {0} seconds")]
    Timeout(u64),

    /// Listing collections failed.
    #[error("list collections: {0}")]
    ListCollections(String),

    /// The connection URI is unusable.
    #[error("cannot get db from uri: {0}")]
    InvalidUri(String),

    /// The runtime could not provide a deadline.
    #[error("cannot create context: {0}")]
    Deadline(String),
}

/// Result of a single readiness probe.
#[derive(Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The backend answered the probe.
    Ready,
    /// Transient failure; worth waiting and trying again.
    Retryable(ProbeError),
    /// Operator or environment error; retrying cannot help.
    Fatal(ProbeError),
}

impl ProbeOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, ProbeOutcome::Ready)
    }
}
