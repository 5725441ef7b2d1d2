//! MongoDB readiness probe.
//!
//! # Responsibilities
//! - Derive the target database from the URI path
//! - Build a client, ping the server and list collections under one deadline
//! - Shut the client down after each attempt
//!
//! # Design Decisions
//! - A URI that cannot name a database is fatal; it will not change between attempts
//! - A deadline that cannot be built is fatal; the runtime itself is broken
//! - Client construction, connect and list failures are retryable

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;
use url::Url;

use crate::config::MongoConfig;
use crate::probe::types::{ProbeError, ProbeOutcome};
use crate::probe::Probe;
use crate::resilience::timeouts::{Deadline, TimeoutError, CONNECT_TIMEOUT};

/// Parsed pieces of a MongoDB URI needed by the probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoTarget {
    /// Host part, for diagnostics.
    pub host: String,
    /// Database named by the URI path.
    pub database: String,
}

impl MongoTarget {
    /// Split a URI into host and database name.
    ///
    /// The path is percent-decoded and one leading `/` stripped; an empty
    /// result is an error.
    pub fn parse(uri: &str) -> Result<Self, ProbeError> {
        let url = Url::parse(uri).map_err(|e| ProbeError::InvalidUri(e.to_string()))?;

        let decoded = urlencoding::decode(url.path())
            .map_err(|e| ProbeError::InvalidUri(format!("database name is not UTF-8: {}", e)))?;
        let path: &str = &decoded;
        let database = path.strip_prefix('/').unwrap_or(path);
        if database.is_empty() {
            return Err(ProbeError::InvalidUri(format!(
                "no database name in path of '{}'",
                redact(&url)
            )));
        }

        Ok(Self {
            host: host_list(&url),
            database: database.to_string(),
        })
    }
}

fn host_list(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        _ => String::new(),
    }
}

fn redact(url: &Url) -> String {
    let mut url = url.clone();
    if url.password().is_some() {
        let _ = url.set_password(Some("***"));
    }
    url.to_string()
}

/// Probe that lists collections in a MongoDB database.
#[derive(Debug, Clone)]
pub struct MongoProbe {
    config: MongoConfig,
}

impl MongoProbe {
    pub fn new(config: MongoConfig) -> Self {
        Self { config }
    }

    async fn client(&self, host: &str) -> Result<Client, ProbeError> {
        let client_err = |e: mongodb::error::Error| ProbeError::Client {
            host: host.to_string(),
            reason: e.to_string(),
        };

        let mut options = ClientOptions::parse(self.config.uri.as_str())
            .await
            .map_err(client_err)?;
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        options.server_selection_timeout = Some(CONNECT_TIMEOUT);

        Client::with_options(options).map_err(client_err)
    }

    async fn ping_and_list(
        client: &Client,
        target: &MongoTarget,
        deadline: &Deadline,
    ) -> Result<Vec<String>, ProbeError> {
        let db = client.database(&target.database);
        let elapsed = |e: TimeoutError| match e {
            TimeoutError::Elapsed(d) => ProbeError::Timeout(d.as_secs()),
            other => ProbeError::Deadline(other.to_string()),
        };

        deadline
            .run(db.run_command(doc! { "ping": 1 }))
            .await
            .map_err(elapsed)?
            .map_err(|e| ProbeError::Connect {
                target: target.host.clone(),
                reason: e.to_string(),
            })?;

        deadline
            .run(db.list_collection_names().filter(doc! {}))
            .await
            .map_err(elapsed)?
            .map_err(|e| ProbeError::ListCollections(e.to_string()))
    }
}

#[async_trait]
impl Probe for MongoProbe {
    fn target(&self) -> String {
        match Url::parse(&self.config.uri) {
            Ok(url) => redact(&url),
            Err(_) => "<invalid uri>".to_string(),
        }
    }

    async fn probe(&self) -> ProbeOutcome {
        let target = match MongoTarget::parse(&self.config.uri) {
            Ok(target) => target,
            Err(e) => return ProbeOutcome::Fatal(e),
        };

        let client = match self.client(&target.host).await {
            Ok(client) => client,
            Err(e) => return ProbeOutcome::Retryable(e),
        };

        let outcome = match Deadline::after(CONNECT_TIMEOUT) {
            Err(e) => ProbeOutcome::Fatal(ProbeError::Deadline(e.to_string())),
            Ok(deadline) => match Self::ping_and_list(&client, &target, &deadline).await {
                Ok(collections) => {
                    tracing::debug!(
                        database = %target.database,
                        collections = collections.len(),
                        "Listed MongoDB collections"
                    );
                    ProbeOutcome::Ready
                }
                Err(e) => ProbeOutcome::Retryable(e),
            },
        };

        client.shutdown().await;
        outcome
    }
}
