//! Cross-cutting CLI tests (help, version, error handling)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help() {
    cargo_bin_cmd!("citedit")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("command-line editing engine"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("citedit")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand() {
    cargo_bin_cmd!("citedit")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    cargo_bin_cmd!("citedit")
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_write_conflicts_with_diff() {
    cargo_bin_cmd!("citedit")
        .args(["shift-right", "--write", "--diff", "doc.org"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_missing_config_file() {
    cargo_bin_cmd!("citedit")
        .args(["--config", "/nonexistent/citedit.toml", "next"])
        .write_stdin("[cite:@a]")
        .assert()
        .failure();
}
