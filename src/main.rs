//! db-wait: block until a database is ready.
//!
//! # Architecture Overview
//!
//! ```text
//!   flags / env ──▶ config ──▶ WaitConfig
//!                                  │
//!                                  ▼
//!                          ┌───────────────┐    Probing(i)     ┌──────────────┐
//!   SIGINT/SIGTERM ──────▶ │ retry driver  │ ────────────────▶ │ probe        │
//!   (lifecycle)            │ 3*i+1 s waits │ ◀──────────────── │ mysql/mongo  │
//!                          └───────┬───────┘   ProbeOutcome    └──────────────┘
//!                                  │
//!                                  ▼
//!        Ready → 0    Fatal → 1    Exhausted → 2    Interrupted → 130
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use db_wait::config::{resolve, RawSettings};
use db_wait::lifecycle::signals::spawn_signal_listener;
use db_wait::observability::logging::init_logging;
use db_wait::resilience::retries::EXIT_FATAL;
use db_wait::{Backend, RetryDriver, RetryPolicy, Shutdown, WaitOutcome};

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let raw = match RawSettings::try_parse() {
        Ok(raw) => raw,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_FATAL)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config = match resolve(raw) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::from(EXIT_FATAL);
        }
    };

    if let Ok(json) = serde_json::to_string(&config) {
        tracing::debug!(config = %json, "Configuration loaded");
    }
    tracing::info!(
        db_type = %config.backend.db_type(),
        tries = config.tries,
        "Waiting for database"
    );

    let shutdown = Arc::new(Shutdown::new());
    let signals = spawn_signal_listener(shutdown.clone());

    let driver = RetryDriver::new(
        Backend::from_config(&config.backend),
        RetryPolicy::new(config.tries),
    );
    let outcome = driver.run(shutdown.subscribe()).await;
    signals.abort();

    match &outcome {
        WaitOutcome::Ready { .. } => println!("Connect success"),
        WaitOutcome::Fatal { error, .. } => tracing::error!("Error: {}", error),
        WaitOutcome::Exhausted { attempts } => {
            tracing::error!(attempts, "Connection attempts have failed")
        }
        WaitOutcome::Interrupted { attempts } => {
            tracing::error!(attempts, "Interrupted while waiting for database")
        }
    }

    ExitCode::from(outcome.exit_code())
}
