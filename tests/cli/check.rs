//! Bibliography-backed subcommand tests (check, sort, suggest, candidates)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const BIB: &str = r#"
@article{smith2020,
  author = {Smith, Jane},
  title = {Ordering References},
  year = {2020},
}

@book{doe2019,
  author = {Doe, John},
  title = {Citation Styles},
  date = {2019-03},
}
"#;

fn setup(doc: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let bib = temp_dir.path().join("refs.bib");
    let file = temp_dir.path().join("notes.org");
    fs::write(&bib, BIB).unwrap();
    fs::write(&file, doc).unwrap();
    (temp_dir, bib, file)
}

#[test]
fn test_check_clean() {
    let (_dir, bib, file) = setup("[cite:@smith2020; @doe2019]");

    cargo_bin_cmd!("citedit")
        .args(["check", "-b", bib.to_str().unwrap(), file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_check_reports_unknown_key() {
    let (_dir, bib, file) = setup("Intro\n[cite:@smiht2020; @doe2019]");

    cargo_bin_cmd!("citedit")
        .args(["check", "-b", bib.to_str().unwrap(), file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown-citation-key"))
        .stdout(predicate::str::contains(":2:8"))
        .stdout(predicate::str::contains("Replace with 'smith2020'"))
        .stdout(predicate::str::contains("Found 1 issue(s)"));
}

#[test]
fn test_check_mode_fails() {
    let (_dir, bib, file) = setup("[cite:@ghost]");

    cargo_bin_cmd!("citedit")
        .args([
            "check",
            "--check",
            "-b",
            bib.to_str().unwrap(),
            file.to_str().unwrap(),
        ])
        .assert()
        .failure();
}

#[test]
fn test_check_fix() {
    let (_dir, bib, file) = setup("[cite:@smiht2020; @doe2019]");

    cargo_bin_cmd!("citedit")
        .args([
            "check",
            "--fix",
            "-b",
            bib.to_str().unwrap(),
            file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("[cite:@smith2020; @doe2019]");
}

#[test]
fn test_bibliography_from_config() {
    let (dir, _bib, file) = setup("[cite:@smith2020; @doe2019]");
    fs::write(
        dir.path().join(".citedit.toml"),
        "bibliography = [\"refs.bib\"]\n",
    )
    .unwrap();

    cargo_bin_cmd!("citedit")
        .args(["check", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_missing_bibliography_fails() {
    let (_dir, _bib, file) = setup("[cite:@a]");

    cargo_bin_cmd!("citedit")
        .args(["check", "-b", "/nonexistent/refs.bib", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read bibliography"));
}

#[test]
fn test_sort_by_year() {
    let (_dir, bib, file) = setup("[cite:@doe2019; @smith2020]");

    cargo_bin_cmd!("citedit")
        .args([
            "sort",
            "--offset",
            "7",
            "-b",
            bib.to_str().unwrap(),
            file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("[cite:@smith2020; @doe2019]")
        .stderr(predicate::str::contains("cursor: 18"));

    cargo_bin_cmd!("citedit")
        .args([
            "sort",
            "--ascending",
            "--offset",
            "7",
            "-b",
            bib.to_str().unwrap(),
            file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("[cite:@doe2019; @smith2020]");
}

#[test]
fn test_suggest_replaces_key() {
    let (_dir, bib, file) = setup("[cite:see @smiht2020, p. 3]");

    cargo_bin_cmd!("citedit")
        .args([
            "suggest",
            "--offset",
            "12",
            "-b",
            bib.to_str().unwrap(),
            file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("[cite:see @smith2020, p. 3]");
}

#[test]
fn test_suggest_list_and_pick() {
    let (_dir, bib, file) = setup("[cite:@smiht2020]");

    cargo_bin_cmd!("citedit")
        .args([
            "suggest",
            "--list",
            "--offset",
            "8",
            "-b",
            bib.to_str().unwrap(),
            file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("smith2020\ndoe2019\n");

    cargo_bin_cmd!("citedit")
        .args([
            "suggest",
            "--pick",
            "doe2019",
            "--offset",
            "8",
            "-b",
            bib.to_str().unwrap(),
            file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("[cite:@doe2019]");

    cargo_bin_cmd!("citedit")
        .args([
            "suggest",
            "--pick",
            "nobody",
            "--offset",
            "8",
            "-b",
            bib.to_str().unwrap(),
            file.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: no key selected"));
}

#[test]
fn test_insert_skips_unknown_keys() {
    let (_dir, bib, file) = setup("[cite:@doe2019]");

    cargo_bin_cmd!("citedit")
        .args([
            "insert",
            "--offset",
            "8",
            "-k",
            "smith2020",
            "-k",
            "ghost",
            "-b",
            bib.to_str().unwrap(),
            file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("[cite:@doe2019; @smith2020]")
        .stderr(predicate::str::contains("skipping 'ghost'"));
}

#[test]
fn test_candidates() {
    let (_dir, bib, _file) = setup("");

    cargo_bin_cmd!("citedit")
        .args(["candidates", "-b", bib.to_str().unwrap()])
        .assert()
        .success()
        .stdout("doe2019\t2019\nsmith2020\t2020\n");
}
