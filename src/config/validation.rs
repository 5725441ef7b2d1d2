//! Configuration validation.
//!
//! # Responsibilities
//! - Enforce the settings a backend cannot run without (host, URI)
//! - Reject unknown backend kinds and invalid ports
//!
//! # Design Decisions
//! - Every failure here is fatal; waiting cannot fix operator input
//! - Validation runs once, before the first attempt

use thiserror::Error;

/// Fatal configuration errors. All map to exit code 1.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("\"MYSQL_HOST\" not set, but \"DB_TYPE\" is set \"mysql\"")]
    MissingMysqlHost,

    #[error("\"MONGODB_URI\" not set, but \"DB_TYPE\" is set \"mongodb\"")]
    MissingMongoUri,

    #[error("unsupported \"DB_TYPE\" '{0}' (expected \"mysql\" or \"mongodb\")")]
    UnsupportedDbType(String),

    #[error("invalid \"MYSQL_PORT\" '{0}'")]
    InvalidPort(String),
}

/// Require a non-empty value, failing with `err` otherwise.
pub fn require(value: Option<String>, err: ConfigError) -> Result<String, ConfigError> {
    value.filter(|v| !v.is_empty()).ok_or(err)
}

/// Parse a TCP port; zero is rejected.
pub fn validate_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort(raw.to_string())),
    }
}
