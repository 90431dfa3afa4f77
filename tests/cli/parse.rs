//! Parse and citations subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_stdin() {
    cargo_bin_cmd!("citedit")
        .arg("parse")
        .write_stdin("See [cite/t:@doe99; @roe2001].")
        .assert()
        .success()
        .stdout(predicate::str::contains("ROOT"))
        .stdout(predicate::str::contains("CITATION_KEY"))
        .stdout(predicate::str::contains("CITE_STYLE"));
}

#[test]
fn test_parse_plain_text() {
    cargo_bin_cmd!("citedit")
        .arg("parse")
        .write_stdin("No citations, just [cite without colon].")
        .assert()
        .success()
        .stdout(predicate::str::contains("TEXT"))
        .stdout(predicate::str::contains("CITATION").not());
}

#[test]
fn test_citations_json() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("notes.org");
    fs::write(&test_file, "A [cite/t:see @a; @b, p. 2] and [cite:@c].").unwrap();

    cargo_bin_cmd!("citedit")
        .args(["citations", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"key\": \"a\""))
        .stdout(predicate::str::contains("\"prefix\": \"see \""))
        .stdout(predicate::str::contains("\"suffix\": \", p. 2\""))
        .stdout(predicate::str::contains("\"command\": \"\\\\citet\""))
        .stdout(predicate::str::contains("\"command\": \"\\\\citep\""));
}

#[test]
fn test_citations_use_config_styles() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("notes.org");
    fs::write(&test_file, "[cite/t:@a]").unwrap();
    fs::write(
        temp_dir.path().join("citedit.toml"),
        "[styles]\nt = \"\\\\textcite\"\n",
    )
    .unwrap();

    cargo_bin_cmd!("citedit")
        .args(["citations", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"command\": \"\\\\textcite\""));
}
