//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a throwaway data directory.

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Duration;

/// Run a CLI command with `data_dir` as the data directory.
fn run_cli(data_dir: &std::path::Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_studytimer"))
        .args(args)
        .env("STUDYTIMER_DATA_DIR", data_dir)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn history_json(data_dir: &std::path::Path) -> serde_json::Value {
    let (code, stdout, _) = run_cli(data_dir, &["history", "show"]);
    assert_eq!(code, 0, "history show failed");
    serde_json::from_str(&stdout).expect("history show should print JSON")
}

#[test]
fn test_suggest_defaults_without_history() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["suggest"]);
    assert_eq!(code, 0, "suggest failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["suggestion_secs"], 1500);
    assert_eq!(parsed["suggestion"], "25:00");
}

#[test]
fn test_history_add_and_show() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(history_json(dir.path()), serde_json::json!({}));

    assert_eq!(run_cli(dir.path(), &["history", "add", "600"]).0, 0);
    assert_eq!(run_cli(dir.path(), &["history", "add", "780"]).0, 0);

    let history = history_json(dir.path());
    let days = history.as_object().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days.values().next().unwrap(), &serde_json::json!([600, 780]));

    let (_, stdout, _) = run_cli(dir.path(), &["suggest"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["suggestion_secs"], 690);
}

#[test]
fn test_history_add_rejects_zero() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["history", "add", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_history_show_single_day() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["history", "add", "900"]);
    let history = history_json(dir.path());
    let today = history.as_object().unwrap().keys().next().unwrap().clone();

    let (code, stdout, _) = run_cli(dir.path(), &["history", "show", "--day", &today]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed, serde_json::json!([900]));

    let (code, stdout, _) = run_cli(dir.path(), &["history", "show", "--day", "1999-01-01"]);
    assert_eq!(code, 0);
    assert_eq!(serde_json::from_str::<serde_json::Value>(&stdout).unwrap(), serde_json::json!([]));
}

#[test]
fn test_history_show_rejects_malformed_day() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(dir.path(), &["history", "show", "--day", "2026-1-30"]);
    assert_ne!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("YYYY-MM-DD"));
}

#[test]
fn test_history_week_json() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["history", "add", "1500"]);
    let (code, stdout, _) = run_cli(dir.path(), &["history", "week", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let days = parsed["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["label"], "Mon");
    let total: u64 = days.iter().map(|d| d["sessions"].as_u64().unwrap()).sum();
    assert_eq!(total, 1);
}

#[test]
fn test_corrupt_history_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("session_history.json"), "not json").unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["history", "show"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_get_and_set() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "timer.study_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1500");

    assert_eq!(run_cli(dir.path(), &["config", "set", "timer.study_secs", "1200"]).0, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "timer.study_secs"]);
    assert_eq!(stdout.trim(), "1200");

    assert_ne!(run_cli(dir.path(), &["config", "set", "timer.study_secs", "0"]).0, 0);
    assert_ne!(run_cli(dir.path(), &["config", "get", "timer.nope"]).0, 0);
}

#[test]
fn test_run_quits_on_q() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_studytimer"))
        .args(["run"])
        .env("STUDYTIMER_DATA_DIR", dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"q\n").unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("25:00"));
}

#[test]
fn test_run_records_completed_study_session() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["config", "set", "alert.enabled", "false"]);

    let mut child = Command::new(env!("CARGO_BIN_EXE_studytimer"))
        .args(["run", "--study-secs", "1", "--autostart"])
        .env("STUDYTIMER_DATA_DIR", dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    let mut stdin = child.stdin.take().unwrap();
    std::thread::sleep(Duration::from_millis(2500));
    stdin.write_all(b"q\n").unwrap();
    drop(stdin);

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Study session complete"));
    assert!(stdout.contains("Break Time"));

    let history = history_json(dir.path());
    let days = history.as_object().unwrap();
    assert_eq!(days.values().next().unwrap(), &serde_json::json!([1]));
}
