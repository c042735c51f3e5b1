use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

/// Runs the binary from an empty directory with an isolated home, so no
/// `.env` or user config file leaks into the test.
fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("blacklist-import").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("MONGODB_URI")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn no_arguments_prints_usage() {
    let dir = TempDir::new().unwrap();
    cmd(dir.path())
        .assert()
        .success()
        .stdout(contains("Usage:"))
        .stdout(contains("Example:"));
}

#[test]
fn missing_connection_string_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("words.txt"), "spam\n").unwrap();

    cmd(dir.path())
        .arg("words.txt")
        .assert()
        .failure()
        .stderr(contains("MONGODB_URI"));
}

#[test]
fn unsupported_extension_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("words.csv"), "spam\n").unwrap();

    cmd(dir.path())
        .env("MONGODB_URI", "mongodb://127.0.0.1:1/site")
        .arg("words.csv")
        .assert()
        .success()
        .stdout(contains("Unsupported file format"));
}

#[test]
fn missing_file_is_not_fatal() {
    let dir = TempDir::new().unwrap();

    cmd(dir.path())
        .env("MONGODB_URI", "mongodb://127.0.0.1:1/site")
        .arg("absent.json")
        .assert()
        .success()
        .stdout(contains("not found"));
}

#[test]
fn connection_failure_is_reported_without_aborting() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("words.txt"), "spam\neggs\n").unwrap();

    cmd(dir.path())
        .env("MONGODB_URI", "mongodb://127.0.0.1:1")
        .arg("words.txt")
        .assert()
        .success()
        .stdout(contains("Error connecting to MongoDB"))
        .stdout(contains("Import complete.").not());
}

#[test]
fn connection_string_is_read_from_dotenv() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("words.csv"), "spam\n").unwrap();
    fs::write(
        dir.path().join(".env.local"),
        "MONGODB_URI=mongodb://127.0.0.1:1/site\n",
    )
    .unwrap();

    cmd(dir.path())
        .arg("words.csv")
        .assert()
        .success()
        .stdout(contains("Unsupported file format"));
}

#[test]
fn dry_run_lists_normalized_words() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("bad_words.json"),
        r#"{"count": 3, "words": ["foo", "bar", 7, "bar"]}"#,
    )
    .unwrap();

    cmd(dir.path())
        .args(["--dry-run", "bad_words.json"])
        .assert()
        .success()
        .stdout(contains("[DRY RUN] foo"))
        .stdout(contains("3 words would be processed."));
}

#[test]
fn dry_run_reports_empty_input() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("empty.txt"), "\n   \n").unwrap();

    cmd(dir.path())
        .args(["--dry-run", "empty.txt"])
        .assert()
        .success()
        .stdout(contains("No words found"));
}
