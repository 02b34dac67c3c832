//! End-to-end tests for the crawler binary's argument handling.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_describes_the_tool() {
    Command::cargo_bin("crawler")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("breadth-first"))
        .stdout(predicate::str::contains("--depth"))
        .stdout(predicate::str::contains("--per-host"));
}

#[test]
fn test_missing_url_fails_with_usage() {
    Command::cargo_bin("crawler")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_zero_depth_rejected() {
    Command::cargo_bin("crawler")
        .unwrap()
        .args(["https://example.com", "--depth", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("crawler")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
