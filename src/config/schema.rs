//! Configuration schema definitions.
//!
//! This module defines the resolved, typed settings for a readiness wait.
//! Types derive `Serialize` so the effective configuration can be logged;
//! secrets are skipped.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Default attempt budget when `TRIES` is unset or not an integer.
pub const DEFAULT_TRIES: u32 = 10;

/// Root configuration for a readiness wait.
#[derive(Debug, Clone, Serialize)]
pub struct WaitConfig {
    /// The backend to probe and its connection parameters.
    pub backend: BackendConfig,

    /// Attempt budget.
    pub tries: u32,
}

/// Supported datastore kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    #[default]
    Mysql,
    Mongodb,
}

impl FromStr for DbType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mysql" => Ok(DbType::Mysql),
            "mongodb" => Ok(DbType::Mongodb),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbType::Mysql => write!(f, "mysql"),
            DbType::Mongodb => write!(f, "mongodb"),
        }
    }
}

/// Backend selection with the parameters that backend needs.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "db_type", rename_all = "lowercase")]
pub enum BackendConfig {
    Mysql(MysqlConfig),
    Mongodb(MongoConfig),
}

impl BackendConfig {
    pub fn db_type(&self) -> DbType {
        match self {
            BackendConfig::Mysql(_) => DbType::Mysql,
            BackendConfig::Mongodb(_) => DbType::Mongodb,
        }
    }
}

/// MySQL connection parameters.
#[derive(Clone, Serialize)]
pub struct MysqlConfig {
    /// Server host name or address (required).
    pub host: String,

    /// Server port (default: 3306).
    pub port: u16,

    /// Login user (default: "root").
    pub user: String,

    /// Login password (default: empty).
    #[serde(skip_serializing)]
    pub password: String,

    /// Database whose tables are listed (default: "test").
    pub database: String,
}

impl MysqlConfig {
    /// Target description safe for diagnostics, e.g. `root:***@tcp(db:3306)/test`.
    pub fn redacted_target(&self) -> String {
        format!(
            "{}:***@tcp({}:{})/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

impl fmt::Debug for MysqlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MysqlConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

/// MongoDB connection parameters.
#[derive(Debug, Clone, Serialize)]
pub struct MongoConfig {
    /// Connection URI; the path names the database to inspect.
    #[serde(skip_serializing)]
    pub uri: String,
}

pub(crate) fn default_mysql_name() -> String {
    "test".to_string()
}

pub(crate) fn default_mysql_user() -> String {
    "root".to_string()
}

pub(crate) fn default_mysql_port() -> u16 {
    3306
}
