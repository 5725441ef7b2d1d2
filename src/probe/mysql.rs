//! MySQL readiness probe.
//!
//! # Responsibilities
//! - Open a fresh connection per attempt
//! - List the tables of the configured database and decode every row
//! - Close the connection whatever the result
//!
//! Every failure here is retryable: the server may still be starting.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{Connection, Row};

use crate::config::MysqlConfig;
use crate::probe::types::{ProbeError, ProbeOutcome};
use crate::probe::Probe;

const LIST_TABLES: &str = "SHOW TABLES";

/// Table names may carry a binary collation, so they are read as bytes.
fn table_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// Probe that lists tables in a MySQL database.
#[derive(Debug, Clone)]
pub struct MysqlProbe {
    config: MysqlConfig,
}

impl MysqlProbe {
    pub fn new(config: MysqlConfig) -> Self {
        Self { config }
    }

    fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .username(&self.config.user)
            .password(&self.config.password)
            .database(&self.config.database)
    }

    async fn list_tables(conn: &mut MySqlConnection) -> Result<Vec<String>, ProbeError> {
        let rows = sqlx::query(LIST_TABLES)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| ProbeError::Query {
                query: LIST_TABLES.to_string(),
                reason: e.to_string(),
            })?;

        rows.iter()
            .map(|row| {
                row.try_get::<Vec<u8>, _>(0)
                    .map(|raw| table_name(&raw))
                    .map_err(|e| ProbeError::Row {
                        query: LIST_TABLES.to_string(),
                        reason: e.to_string(),
                    })
            })
            .collect()
    }
}

#[async_trait]
impl Probe for MysqlProbe {
    fn target(&self) -> String {
        self.config.redacted_target()
    }

    async fn probe(&self) -> ProbeOutcome {
        let mut conn = match MySqlConnection::connect_with(&self.connect_options()).await {
            Ok(conn) => conn,
            Err(e) => {
                return ProbeOutcome::Retryable(ProbeError::Connect {
                    target: self.target(),
                    reason: e.to_string(),
                })
            }
        };

        let listed = Self::list_tables(&mut conn).await;

        if let Err(e) = conn.close().await {
            tracing::debug!(error = %e, "Closing MySQL connection failed");
        }

        match listed {
            Ok(tables) => {
                tracing::debug!(
                    database = %self.config.database,
                    tables = tables.len(),
                    "Listed MySQL tables"
                );
                ProbeOutcome::Ready
            }
            Err(e) => ProbeOutcome::Retryable(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    fn config(port: u16) -> MysqlConfig {
        MysqlConfig {
            host: "127.0.0.1".into(),
            port,
            user: "root".into(),
            password: "secret".into(),
            database: "test".into(),
        }
    }

    #[test]
    fn test_connect_options() {
        let probe = MysqlProbe::new(config(3307));
        let opts = probe.connect_options();
        assert_eq!(opts.get_host(), "127.0.0.1");
        assert_eq!(opts.get_port(), 3307);
        assert_eq!(opts.get_username(), "root");
        assert_eq!(opts.get_database(), Some("test"));
    }

    #[test]
    fn test_table_name_from_bytes() {
        assert_eq!(table_name(b"users"), "users");
        assert_eq!(table_name("r\u{e9}sum\u{e9}".as_bytes()), "r\u{e9}sum\u{e9}");
        assert_eq!(table_name(&[b'a', 0xff, b'b']), "a\u{fffd}b");
        assert_eq!(table_name(b""), "");
    }

    #[tokio::test]
    async fn test_refused_connection_is_retryable() {
        // Reserve a port, then free it so nothing is listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let probe = MysqlProbe::new(config(port));
        match probe.probe().await {
            ProbeOutcome::Retryable(ProbeError::Connect { target, .. }) => {
                assert!(!target.contains("secret"));
                assert!(target.contains(&port.to_string()));
            }
            other => panic!("expected retryable connect error, got {:?}", other),
        }
    }
}
