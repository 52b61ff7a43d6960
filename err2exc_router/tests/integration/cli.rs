//! Integration test: the `err2exc` binary's exit statuses.
//!
//! Runs the built binary and checks how each disposition ends the process:
//! 1. Continue exits 0
//! 2. Terminate runs shutdown hooks and exits 1
//! 3. An uncaught rethrow exits 255
//! 4. Bad arguments or configuration exit 2

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

fn err2exc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_err2exc"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn notice_continues_with_status_zero() {
    let out = err2exc(&["--kind", "E_NOTICE", "--message", "undefined index"]);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn user_error_terminates_with_status_one() {
    let out = err2exc(&[
        "--kind",
        "E_USER_ERROR",
        "--message",
        "quota exceeded",
        "--file",
        "q.php",
        "--line",
        "30",
    ]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn terminate_keeps_last_error_output() {
    let out = err2exc(&[
        "--kind",
        "E_USER_ERROR",
        "--message",
        "quota exceeded",
        "--print-last",
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains(r#""message": "quota exceeded""#));
}

#[test]
fn user_warning_is_uncaught_with_status_255() {
    let out = err2exc(&["--kind", "E_USER_WARNING", "--message", "low disk"]);
    assert_eq!(out.status.code(), Some(255));
}

#[test]
fn configured_terminate_mask_is_honoured() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("err2exc.toml");
    fs::write(
        &path,
        r#"
[policy]
terminate = "NOTICE"
"#,
    )
    .unwrap();

    let out = err2exc(&[
        "--config",
        path.to_str().unwrap(),
        "--kind",
        "notice",
        "--message",
        "n",
    ]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn unknown_kind_is_a_usage_error() {
    let out = err2exc(&["--kind", "E_BOGUS", "--message", "x"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn missing_config_file_is_a_usage_error() {
    let out = err2exc(&[
        "--config",
        "/nonexistent/err2exc.toml",
        "--kind",
        "E_NOTICE",
        "--message",
        "x",
    ]);
    assert_eq!(out.status.code(), Some(2));
}
