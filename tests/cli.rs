//! CLI smoke tests
//!
//! These exercise the binary surface that needs no running service. The
//! data directory is pointed at a temp dir so the user's real configuration
//! is never touched.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pocketbudget(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pocketbudget").unwrap();
    cmd.env("POCKETBUDGET_DATA_DIR", data_dir.path());
    cmd
}

#[test]
fn help_shows_usage() {
    let temp = TempDir::new().unwrap();
    pocketbudget(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terminal client"))
        .stdout(predicate::str::contains("budget"))
        .stdout(predicate::str::contains("login"));
}

#[test]
fn no_args_prints_intro() {
    let temp = TempDir::new().unwrap();
    pocketbudget(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("pocketbudget tui"));
}

#[test]
fn config_shows_paths() {
    let temp = TempDir::new().unwrap();
    pocketbudget(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("API base URL"))
        .stdout(predicate::str::contains("config.json"))
        .stdout(predicate::str::contains("Logged in:"))
        .stdout(predicate::str::contains("false"));
}

#[test]
fn init_writes_settings_file() {
    let temp = TempDir::new().unwrap();
    pocketbudget(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote configuration"));

    assert!(temp.path().join("config.json").exists());
}

#[test]
fn budget_commands_require_login() {
    let temp = TempDir::new().unwrap();
    pocketbudget(&temp)
        .args(["budget", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn logout_without_session() {
    let temp = TempDir::new().unwrap();
    pocketbudget(&temp)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("No active session"));
}
