//! Configuration loading from flags and the process environment.

use clap::Parser;

use crate::config::schema::{
    default_mysql_name, default_mysql_port, default_mysql_user, BackendConfig, DbType,
    MongoConfig, MysqlConfig, WaitConfig, DEFAULT_TRIES,
};
use crate::config::validation::{require, validate_port, ConfigError};

/// Raw, unvalidated settings.
///
/// Every flag falls back to the environment variable of the same meaning.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "db-wait")]
#[command(version, about = "Block until a MySQL or MongoDB database accepts connections", long_about = None)]
pub struct RawSettings {
    /// Backend kind: "mysql" (default) or "mongodb".
    #[arg(long, env = "DB_TYPE")]
    pub db_type: Option<String>,

    /// MySQL database name [default: test].
    #[arg(long, env = "MYSQL_NAME")]
    pub mysql_name: Option<String>,

    /// MySQL user [default: root].
    #[arg(long, env = "MYSQL_USER")]
    pub mysql_user: Option<String>,

    /// MySQL password [default: empty].
    #[arg(long, env = "MYSQL_PASS", hide_env_values = true)]
    pub mysql_pass: Option<String>,

    /// MySQL host (required for mysql).
    #[arg(long, env = "MYSQL_HOST")]
    pub mysql_host: Option<String>,

    /// MySQL port [default: 3306].
    #[arg(long, env = "MYSQL_PORT")]
    pub mysql_port: Option<String>,

    /// MongoDB connection URI (required for mongodb).
    #[arg(long, env = "MONGODB_URI", hide_env_values = true)]
    pub mongodb_uri: Option<String>,

    /// Attempt budget [default: 10]; non-integers fall back to the default.
    #[arg(long, env = "TRIES")]
    pub tries: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Resolve an attempt budget. Anything that is not an integer means the default.
pub fn parse_tries(raw: Option<&str>) -> u32 {
    match raw.map(str::parse::<i64>) {
        Some(Ok(n)) => n.clamp(0, u32::MAX as i64) as u32,
        _ => DEFAULT_TRIES,
    }
}

/// Resolve raw settings into a validated configuration.
pub fn resolve(raw: RawSettings) -> Result<WaitConfig, ConfigError> {
    let db_type = match non_empty(raw.db_type) {
        Some(s) => s.parse::<DbType>().map_err(ConfigError::UnsupportedDbType)?,
        None => DbType::default(),
    };

    let backend = match db_type {
        DbType::Mysql => {
            let host = require(raw.mysql_host, ConfigError::MissingMysqlHost)?;
            let port = match non_empty(raw.mysql_port) {
                Some(p) => validate_port(&p)?,
                None => default_mysql_port(),
            };
            BackendConfig::Mysql(MysqlConfig {
                host,
                port,
                user: non_empty(raw.mysql_user).unwrap_or_else(default_mysql_user),
                password: raw.mysql_pass.unwrap_or_default(),
                database: non_empty(raw.mysql_name).unwrap_or_else(default_mysql_name),
            })
        }
        DbType::Mongodb => BackendConfig::Mongodb(MongoConfig {
            uri: require(raw.mongodb_uri, ConfigError::MissingMongoUri)?,
        }),
    };

    Ok(WaitConfig {
        backend,
        tries: parse_tries(raw.tries.as_deref()),
    })
}
