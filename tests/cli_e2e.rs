//! End-to-end CLI tests for daybrief.
//!
//! These tests run the actual binary and check exit codes and output.
//! None of them need a live endpoint: success paths stop at validation
//! errors, and endpoint failures are provoked by pointing `--base-url` at
//! a loopback port with nothing listening.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Creates a temporary directory with a small WhatsApp export.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    let whatsapp = "[1/15/24, 10:30:00 AM] Alice: Hello everyone!
[1/15/24, 10:31:00 AM] Bob: Hi Alice!
[1/15/24, 10:32:00 AM] Alice: How is everyone doing?
[1/16/24, 09:00:00 AM] Bob: New day, new plans";
    fs::write(dir.path().join("whatsapp.txt"), whatsapp).unwrap();

    fs::write(dir.path().join("garbage.txt"), "not a chat export\nat all").unwrap();

    dir
}

fn daybrief() -> Command {
    let mut cmd = Command::cargo_bin("daybrief").expect("binary exists");
    // Keep host environment out of argument resolution
    cmd.env_remove("CHAT_FILE_PATH").env_remove("LM_STUDIO_MODEL_ID");
    cmd
}

// Nothing listens on loopback port 1, so every request fails fast
const DEAD_ENDPOINT: &str = "http://127.0.0.1:1/v1";

// ============================================================================
// Validation errors (exit code 1)
// ============================================================================

#[test]
fn test_missing_input_file() {
    daybrief()
        .args(["/nonexistent/chat.txt", "--model", "m"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_unrecognized_export_format() {
    let dir = setup_fixtures();
    daybrief()
        .arg(dir.path().join("garbage.txt"))
        .args(["--model", "m"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("format"));
}

#[test]
fn test_invalid_range_date() {
    let dir = setup_fixtures();
    daybrief()
        .arg(dir.path().join("whatsapp.txt"))
        .args(["--model", "m", "--from", "15/01/2024"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_empty_range() {
    let dir = setup_fixtures();
    daybrief()
        .arg(dir.path().join("whatsapp.txt"))
        .args([
            "--model",
            "m",
            "--from",
            "2025-06-01",
            "--to",
            "2025-06-30",
            "--base-url",
            DEAD_ENDPOINT,
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No messages between"));
}

#[test]
fn test_inverted_range() {
    let dir = setup_fixtures();
    daybrief()
        .arg(dir.path().join("whatsapp.txt"))
        .args(["--model", "m", "--from", "2024-01-16", "--to", "2024-01-15"])
        .assert()
        .code(1);
}

#[test]
fn test_unknown_locale() {
    let dir = setup_fixtures();
    daybrief()
        .arg(dir.path().join("whatsapp.txt"))
        .args(["--model", "m", "--locale", "klingon"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown locale"));
}

#[test]
fn test_too_many_sender_overrides() {
    let dir = setup_fixtures();
    daybrief()
        .arg(dir.path().join("whatsapp.txt"))
        .args([
            "--model", "m", "--sender", "A", "--sender", "B", "--sender", "C",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("at most two"));
}

#[test]
fn test_missing_model_is_config_error() {
    let dir = setup_fixtures();
    daybrief()
        .current_dir(dir.path())
        .arg(dir.path().join("whatsapp.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("model id is not set"));
}

#[test]
fn test_missing_input_is_config_error() {
    let dir = setup_fixtures();
    daybrief()
        .current_dir(dir.path())
        .args(["--model", "m"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no input file given"));
}

// ============================================================================
// Endpoint failures (exit code 2)
// ============================================================================

#[test]
fn test_all_days_fail_without_endpoint() {
    let dir = setup_fixtures();
    daybrief()
        .current_dir(dir.path())
        .arg(dir.path().join("whatsapp.txt"))
        .args(["--model", "m", "--base-url", DEAD_ENDPOINT, "--timeout", "2"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Found 4 messages"))
        .stdout(predicate::str::contains("[summarization failed:"));
}

#[test]
fn test_failed_run_still_prints_report_sections() {
    let dir = setup_fixtures();
    daybrief()
        .current_dir(dir.path())
        .arg(dir.path().join("whatsapp.txt"))
        .args(["--model", "m", "--base-url", DEAD_ENDPOINT, "--timeout", "2"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("=== 2024-01-15"))
        .stdout(predicate::str::contains("=== 2024-01-16"));
}

// ============================================================================
// Flags and help
// ============================================================================

#[test]
fn test_help_shows_examples() {
    daybrief()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("EXAMPLES"))
        .stdout(predicate::str::contains("--max-chunk-chars"))
        .stdout(predicate::str::contains("--overlap-messages"));
}

#[test]
fn test_version_flag() {
    daybrief()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("daybrief"));
}

#[test]
fn test_env_var_input_path() {
    let dir = setup_fixtures();
    daybrief()
        .current_dir(dir.path())
        .env("CHAT_FILE_PATH", dir.path().join("whatsapp.txt"))
        .env("LM_STUDIO_MODEL_ID", "env-model")
        .args(["--base-url", DEAD_ENDPOINT, "--timeout", "2"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("env-model"));
}

#[test]
fn test_report_file_written_by_default() {
    let dir = setup_fixtures();
    daybrief()
        .current_dir(dir.path())
        .arg(dir.path().join("whatsapp.txt"))
        .args(["--model", "m", "--base-url", DEAD_ENDPOINT, "--timeout", "2"])
        .assert()
        .code(2);

    // No -o flag: the report still lands in the default file
    let report = fs::read_to_string(dir.path().join("daybrief_report.txt")).unwrap();
    assert!(report.contains("Daily Chat Summaries"));
    assert!(report.contains("=== 2024-01-15"));
    assert!(report.contains("=== 2024-01-16"));
}

#[test]
fn test_report_written_to_output_file() {
    let dir = setup_fixtures();
    let report_path = dir.path().join("report.txt");
    daybrief()
        .arg(dir.path().join("whatsapp.txt"))
        .args(["--model", "m", "--base-url", DEAD_ENDPOINT, "--timeout", "2"])
        .arg("-o")
        .arg(&report_path)
        .assert()
        .code(2);

    let report = fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("Daily Chat Summaries"));
    assert!(report.contains("=== 2024-01-15"));
}

#[test]
fn test_forced_locale_parses_eu_export() {
    let dir = setup_fixtures();
    // 03/01 is January 3rd under the EU slash locale
    let eu = "03/01/2024, 10:30 - Alice: Hello\n03/01/2024, 10:31 - Bob: Hi";
    fs::write(dir.path().join("eu.txt"), eu).unwrap();

    daybrief()
        .current_dir(dir.path())
        .arg(dir.path().join("eu.txt"))
        .args([
            "--model",
            "m",
            "--locale",
            "eu-slash",
            "--base-url",
            DEAD_ENDPOINT,
            "--timeout",
            "2",
        ])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("2024-01-03"));
}
