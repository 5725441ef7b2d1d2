//! Readiness probes.
//!
//! # Data Flow
//! ```text
//! WaitConfig.backend
//!     → Backend::from_config (select mysql.rs or mongo.rs)
//!     → Probe::probe() once per attempt
//!     → ProbeOutcome { Ready | Retryable(err) | Fatal(err) }
//!     → retry driver decides: stop, sleep and retry, or exit
//! ```
//!
//! # Design Decisions
//! - Connections are opened fresh per attempt and released before returning
//! - Probes classify their own failures; the driver stays backend-agnostic
//! - A probe never panics on I/O errors; every failure becomes an outcome

pub mod mongo;
pub mod mysql;
pub mod types;

use async_trait::async_trait;

use crate::config::BackendConfig;

pub use mongo::MongoProbe;
pub use mysql::MysqlProbe;
pub use types::{ProbeError, ProbeOutcome};

/// A single readiness check against a datastore.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Human-readable target, safe to log (no secrets).
    fn target(&self) -> String;

    /// Run one probe attempt.
    async fn probe(&self) -> ProbeOutcome;
}

/// The supported backends.
#[derive(Debug, Clone)]
pub enum Backend {
    Mysql(MysqlProbe),
    Mongodb(MongoProbe),
}

impl Backend {
    pub fn from_config(config: &BackendConfig) -> Self {
        match config {
            BackendConfig::Mysql(c) => Backend::Mysql(MysqlProbe::new(c.clone())),
            BackendConfig::Mongodb(c) => Backend::Mongodb(MongoProbe::new(c.clone())),
        }
    }
}

#[async_trait]
impl Probe for Backend {
    fn target(&self) -> String {
        match self {
            Backend::Mysql(p) => p.target(),
            Backend::Mongodb(p) => p.target(),
        }
    }

    async fn probe(&self) -> ProbeOutcome {
        match self {
            Backend::Mysql(p) => p.probe().await,
            Backend::Mongodb(p) => p.probe().await,
        }
    }
}
