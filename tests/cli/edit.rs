//! Editing and motion subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const TWO: &str = "[cite:@a; @b]";

#[test]
fn test_shift_right_stdin() {
    cargo_bin_cmd!("citedit")
        .args(["shift-right", "--offset", "7"])
        .write_stdin(TWO)
        .assert()
        .success()
        .stdout("[cite:@b; @a]")
        .stderr(predicate::str::contains("cursor: 10"));
}

#[test]
fn test_shift_left_at_first_is_noop() {
    cargo_bin_cmd!("citedit")
        .args(["shift-left", "--offset", "7"])
        .write_stdin(TWO)
        .assert()
        .success()
        .stdout(TWO)
        .stderr(predicate::str::contains("cursor: 7"));
}

#[test]
fn test_shift_single_reference_fails() {
    cargo_bin_cmd!("citedit")
        .args(["shift-right", "--offset", "7"])
        .write_stdin("[cite:@a]")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: only one reference, cannot shift",
        ));
}

#[test]
fn test_not_on_citation() {
    cargo_bin_cmd!("citedit")
        .args(["shift-right", "--offset", "1"])
        .write_stdin("text [cite:@a; @b]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: not on a citation"));
}

#[test]
fn test_shift_write_in_place() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("notes.org");
    fs::write(&test_file, "Intro [cite:@a; @b; @c].\n").unwrap();

    cargo_bin_cmd!("citedit")
        .args([
            "shift-right",
            "--offset",
            "17",
            "--write",
            test_file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("");

    let content = fs::read_to_string(&test_file).unwrap();
    assert_eq!(content, "Intro [cite:@a; @c; @b].\n");
}

#[test]
fn test_write_requires_file() {
    cargo_bin_cmd!("citedit")
        .args(["shift-right", "--offset", "7", "--write"])
        .write_stdin(TWO)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--write requires an input file"));
}

#[test]
fn test_diff_output() {
    cargo_bin_cmd!("citedit")
        .args(["shift-right", "--offset", "7", "--diff"])
        .write_stdin("[cite:@a; @b]\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("-[cite:@a; @b]"))
        .stdout(predicate::str::contains("+[cite:@b; @a]"));
}

#[test]
fn test_motions_print_offsets() {
    let doc = "[cite:@a; @b] and [cite:@c]";

    cargo_bin_cmd!("citedit")
        .args(["next", "--offset", "7"])
        .write_stdin(doc)
        .assert()
        .success()
        .stdout("10\n");

    cargo_bin_cmd!("citedit")
        .args(["next", "--offset", "11"])
        .write_stdin(doc)
        .assert()
        .success()
        .stdout("24\n");

    cargo_bin_cmd!("citedit")
        .args(["previous", "--offset", "24"])
        .write_stdin(doc)
        .assert()
        .success()
        .stdout("10\n");

    cargo_bin_cmd!("citedit")
        .args(["start", "--offset", "11"])
        .write_stdin(doc)
        .assert()
        .success()
        .stdout("0\n");

    cargo_bin_cmd!("citedit")
        .args(["end", "--offset", "11"])
        .write_stdin(doc)
        .assert()
        .success()
        .stdout("13\n");
}

#[test]
fn test_style_set_and_clear() {
    cargo_bin_cmd!("citedit")
        .args(["style", "t", "--offset", "2"])
        .write_stdin(TWO)
        .assert()
        .success()
        .stdout("[cite/t:@a; @b]");

    cargo_bin_cmd!("citedit")
        .args(["style", "--clear", "--offset", "2"])
        .write_stdin("[cite/t:@a; @b]")
        .assert()
        .success()
        .stdout(TWO);
}

#[test]
fn test_style_lists_table() {
    cargo_bin_cmd!("citedit")
        .arg("style")
        .assert()
        .success()
        .stdout(predicate::str::contains("t\t\\citet"))
        .stdout(predicate::str::contains("(default)\t\\citep"));
}

#[test]
fn test_style_invalid_token() {
    cargo_bin_cmd!("citedit")
        .args(["style", "t:x", "--offset", "2"])
        .write_stdin(TWO)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid citation style"));
}

#[test]
fn test_annotate_warns() {
    cargo_bin_cmd!("citedit")
        .args(["annotate", "--offset", "11", "--prefix", "see"])
        .write_stdin(TWO)
        .assert()
        .success()
        .stdout("[cite:@a; see @b]")
        .stderr(predicate::str::contains("warning: prefix not supported here"));
}

#[test]
fn test_annotate_refuses_separator() {
    cargo_bin_cmd!("citedit")
        .args(["annotate", "--offset", "11", "--suffix", "; more"])
        .write_stdin(TWO)
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains(
            "annotation would change the citation: '@b; more'",
        ));
}

#[test]
fn test_copy_mark_kill_delete() {
    cargo_bin_cmd!("citedit")
        .args(["copy", "--offset", "11"])
        .write_stdin(TWO)
        .assert()
        .success()
        .stdout("@b\n");

    cargo_bin_cmd!("citedit")
        .args(["mark", "--offset", "11"])
        .write_stdin(TWO)
        .assert()
        .success()
        .stdout("10..12\n");

    cargo_bin_cmd!("citedit")
        .args(["kill", "--offset", "11"])
        .write_stdin(TWO)
        .assert()
        .success()
        .stdout("[cite:@a]")
        .stderr(predicate::str::contains("killed: @b"));

    cargo_bin_cmd!("citedit")
        .args(["delete", "--offset", "9"])
        .write_stdin("x [cite:@a] y")
        .assert()
        .success()
        .stdout("x  y");
}

#[test]
fn test_delete_off_reference() {
    cargo_bin_cmd!("citedit")
        .args(["delete", "--offset", "2"])
        .write_stdin(TWO)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: not on a citation reference"));
}

#[test]
fn test_insert_without_bibliography() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("notes.org");
    fs::write(&test_file, "Hello .").unwrap();

    cargo_bin_cmd!("citedit")
        .args([
            "insert",
            "--offset",
            "6",
            "--key",
            "k1",
            "--key",
            "k2",
            test_file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("Hello [cite:@k1; @k2].")
        .stderr(predicate::str::contains("cursor: 12"));
}
