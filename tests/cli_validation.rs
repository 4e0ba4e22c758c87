//! E2E tests for CLI validation failures
//!
//! All of these must abort with a descriptive error and non-zero exit before
//! the watch loop starts.

use std::process::Command;
use tempfile::tempdir;

fn onchange() -> Command {
    Command::new(env!("CARGO_BIN_EXE_onchange"))
}

#[test]
fn unknown_interval_suffix_fails_before_watching() {
    let dir = tempdir().unwrap();
    let output = onchange()
        .args([
            "-d",
            dir.path().to_str().unwrap(),
            "-c",
            "echo hi",
            "-i",
            "500xx",
        ])
        .output()
        .expect("Failed to run onchange");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unknown interval: 500xx"),
        "expected interval error, got: {stderr}"
    );
}

#[test]
fn zero_interval_is_rejected() {
    let dir = tempdir().unwrap();
    let output = onchange()
        .args([
            "-d",
            dir.path().to_str().unwrap(),
            "-c",
            "echo hi",
            "-i",
            "0ms",
        ])
        .output()
        .expect("Failed to run onchange");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid interval"),
        "expected interval error, got: {stderr}"
    );
}

#[test]
fn missing_watch_dir_fails() {
    let output = onchange()
        .args(["-c", "echo hi"])
        .output()
        .expect("Failed to run onchange");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("--watch-dir"),
        "expected missing flag report, got: {stderr}"
    );
}

#[test]
fn missing_command_fails() {
    let output = onchange()
        .args(["-d", "."])
        .output()
        .expect("Failed to run onchange");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("--command"),
        "expected missing flag report, got: {stderr}"
    );
}

#[test]
fn nonexistent_watch_dir_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("no-such-subdir");
    let output = onchange()
        .args(["-d", missing.to_str().unwrap(), "-c", "echo hi"])
        .output()
        .expect("Failed to run onchange");

    assert!(!output.status.success());
}
