//! Integration tests for the docrank CLI surface: help, version, exit codes

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use tempfile::tempdir;

fn docrank() -> Command {
    cargo_bin_cmd!("docrank")
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    docrank()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: docrank"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("rank"))
        .stdout(predicate::str::contains("recommend"));
}

#[test]
fn test_version_flag() {
    docrank()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("docrank"));
}

#[test]
fn test_no_command_prints_hint() {
    docrank()
        .assert()
        .success()
        .stdout(predicate::str::contains("docrank --help"));
}

#[test]
fn test_subcommand_help() {
    docrank()
        .args(["rank", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--sort-by"));
}

// ============================================================================
// Exit codes
// ============================================================================

#[test]
fn test_unknown_format_exit_code_2() {
    docrank()
        .args(["--format", "yaml", "stats"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_command_exit_code_2() {
    docrank().arg("frobnicate").assert().code(2);
}

#[test]
fn test_unknown_argument_json_usage_error() {
    docrank()
        .args(["--format", "json", "rank", "--bogus-flag"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"usage_error\""));
}

#[test]
fn test_missing_workspace_exit_code_3() {
    let dir = tempdir().unwrap();

    docrank()
        .current_dir(dir.path())
        .arg("rank")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_missing_workspace_json_error() {
    let dir = tempdir().unwrap();

    docrank()
        .current_dir(dir.path())
        .args(["--format", "json", "stats"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\":\"store_not_found\""));
}

#[test]
fn test_quiet_suppresses_error_message() {
    let dir = tempdir().unwrap();

    docrank()
        .current_dir(dir.path())
        .args(["--quiet", "stats"])
        .assert()
        .code(3)
        .stderr(predicate::str::is_empty());
}
