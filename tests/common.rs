#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use habitlogger::db::initialize::ensure_database;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Day used to pin "today" in CLI tests.
pub const TODAY: &str = "05-06-24";

pub fn hl() -> Command {
    cargo_bin_cmd!("habitlogger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_habitlogger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize a test DB through the CLI (no config file is written)
pub fn init_db(db_path: &str) {
    hl().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Run a CLI command against `db_path` with "today" pinned to `TODAY`
pub fn run_on(db_path: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    hl().args(["--db", db_path, "--today", TODAY])
        .args(args)
        .assert()
}

/// A fresh database with the schema, inside a directory removed on drop
pub fn fresh_db() -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("habits.sqlite").to_string_lossy().to_string();
    ensure_database(&path).expect("schema");
    (dir, path)
}

/// Parse a `dd-MM-yy` date for tests
pub fn d(s: &str) -> NaiveDate {
    habitlogger::utils::date::parse_display(s).expect("valid test date")
}
