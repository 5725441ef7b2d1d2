//! Exit-code and output contract of the `db-wait` binary.

mod common;

use std::io::{BufRead, BufReader};
use std::time::{Duration, Instant};

use common::{run_db_wait, spawn_db_wait};

fn stdout(out: &std::process::Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &std::process::Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn test_missing_mysql_host_exits_1() {
    let out = run_db_wait(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty());
    assert!(stderr(&out).contains("MYSQL_HOST"));
}

#[test]
fn test_missing_mongodb_uri_exits_1() {
    let out = run_db_wait(&[("DB_TYPE", "mongodb")]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("MONGODB_URI"));
}

#[test]
fn test_unsupported_db_type_exits_1() {
    let out = run_db_wait(&[("DB_TYPE", "redis"), ("MYSQL_HOST", "127.0.0.1")]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("redis"));
}

#[test]
fn test_mongodb_uri_without_database_exits_1() {
    let out = run_db_wait(&[
        ("DB_TYPE", "mongodb"),
        ("MONGODB_URI", "mongodb://127.0.0.1:27017"),
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("cannot get db from uri"));
}

#[tokio::test]
async fn test_unreachable_mysql_exits_2() {
    let port = common::closed_port().await.to_string();
    let out = run_db_wait(&[
        ("MYSQL_HOST", "127.0.0.1"),
        ("MYSQL_PORT", port.as_str()),
        ("MYSQL_PASS", "secret"),
        ("TRIES", "2"),
    ]);

    assert_eq!(out.status.code(), Some(2));
    assert!(stdout(&out).is_empty());
    let err = stderr(&out);
    assert!(err.contains("Try (1/2)"));
    assert!(err.contains("Connection attempts have failed"));
    assert!(!err.contains("secret"));
}

#[tokio::test]
async fn test_budget_of_one_makes_single_attempt() {
    let port = common::closed_port().await.to_string();
    let start = Instant::now();
    let out = run_db_wait(&[
        ("MYSQL_HOST", "127.0.0.1"),
        ("MYSQL_PORT", port.as_str()),
        ("TRIES", "1"),
    ]);

    assert_eq!(out.status.code(), Some(2));
    let err = stderr(&out);
    assert_eq!(err.matches("Try (").count(), 1);
    assert!(err.contains("Try (1/1) error"));
    assert!(!err.contains("sleep"));
    // No backoff: the first wait would be 4 seconds.
    assert!(start.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_non_integer_tries_uses_default_budget() {
    let port = common::closed_port().await.to_string();
    let mut child = spawn_db_wait(&[
        ("MYSQL_HOST", "127.0.0.1"),
        ("MYSQL_PORT", port.as_str()),
        ("TRIES", "abc"),
    ]);

    let pipe = child.stderr.take().unwrap();
    let first_try = BufReader::new(pipe)
        .lines()
        .map_while(Result::ok)
        .find(|line| line.contains("Try ("));

    // The full default schedule takes minutes; one diagnostic is enough.
    let _ = child.kill();
    let _ = child.wait();

    let line = first_try.expect("no retry diagnostic before exit");
    assert!(line.contains("Try (1/10) sleep 4 seconds"), "{}", line);
}

#[test]
fn test_help_exits_0() {
    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_db-wait"));
    let out = cmd.arg("--help").output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("MYSQL_HOST"));
}
