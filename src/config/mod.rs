//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! flags / environment (DB_TYPE, MYSQL_*, MONGODB_URI, TRIES)
//!     → loader.rs (clap: flag, else env var, as raw strings)
//!     → validation.rs (required values, ports, backend kind)
//!     → WaitConfig (validated, immutable)
//!     → passed by value to the retry driver
//! ```
//!
//! # Design Decisions
//! - The environment is read exactly once, at startup
//! - Empty values are treated as unset
//! - A malformed attempt budget silently becomes the default

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{resolve, RawSettings};
pub use schema::{BackendConfig, DbType, MongoConfig, MysqlConfig, WaitConfig};
pub use validation::ConfigError;
