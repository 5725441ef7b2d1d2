//! Shared utilities for integration tests.

use std::process::{Child, Command, Output, Stdio};

use tokio::net::TcpListener;

/// Environment variables the binary reads; cleared before each run.
#[allow(dead_code)]
pub const SETTINGS: &[&str] = &[
    "DB_TYPE",
    "MYSQL_NAME",
    "MYSQL_USER",
    "MYSQL_PASS",
    "MYSQL_HOST",
    "MYSQL_PORT",
    "MONGODB_URI",
    "TRIES",
];

/// A local port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// Start a listener that accepts and immediately drops every connection.
#[allow(dead_code)]
pub async fn start_hangup_server() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });

    port
}

#[allow(dead_code)]
fn db_wait_command(env: &[(&str, &str)]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_db-wait"));
    for key in SETTINGS {
        cmd.env_remove(key);
    }
    cmd.env("RUST_LOG", "db_wait=info");
    cmd.envs(env.iter().copied());
    cmd
}

/// Run the binary with exactly `env` set.
#[allow(dead_code)]
pub fn run_db_wait(env: &[(&str, &str)]) -> Output {
    db_wait_command(env)
        .output()
        .expect("failed to run db-wait")
}

/// Start the binary with exactly `env` set and stderr piped.
#[allow(dead_code)]
pub fn spawn_db_wait(env: &[(&str, &str)]) -> Child {
    db_wait_command(env)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start db-wait")
}
