//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run with HOME pointed at a
//! throwaway directory, so each test gets a fresh store.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command against the given home directory.
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "studyzen-cli", "--quiet", "--"])
        .args(args)
        .env("HOME", home)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn register(home: &Path, username: &str) {
    let (_, stderr, code) = run_cli(
        home,
        &[
            "account", "register", username, "--name", "Test User", "--password", "hunter22",
        ],
    );
    assert_eq!(code, 0, "register failed: {stderr}");
}

#[test]
fn test_register_and_login() {
    let home = TempDir::new().unwrap();
    register(home.path(), "ada");

    let (stdout, _, code) = run_cli(
        home.path(),
        &["account", "login", "ada", "--password", "hunter22"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("welcome back"));

    let (_, _, code) = run_cli(
        home.path(),
        &["account", "login", "ada", "--password", "wrong"],
    );
    assert_ne!(code, 0);
}

#[test]
fn test_session_lifecycle() {
    let home = TempDir::new().unwrap();
    register(home.path(), "ada");

    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["session", "start", "ada", "--subject", "Math"],
    );
    assert_eq!(code, 0, "session start failed: {stderr}");
    let session: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = session["id"].as_str().unwrap();
    assert_eq!(session["completed"], serde_json::Value::Bool(false));

    let (stdout, _, code) = run_cli(home.path(), &["session", "end", id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("completed"));

    let (_, _, code) = run_cli(home.path(), &["session", "end", "bogus-id"]);
    assert_ne!(code, 0);
}

#[test]
fn test_stats_after_session() {
    let home = TempDir::new().unwrap();
    register(home.path(), "ada");

    let (stdout, _, _) = run_cli(
        home.path(),
        &["session", "start", "ada", "--subject", "Math"],
    );
    let session: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = session["id"].as_str().unwrap();
    run_cli(home.path(), &["session", "end", id]);

    let (stdout, _, code) = run_cli(home.path(), &["stats", "show", "ada"]);
    assert_eq!(code, 0);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["current_streak"], serde_json::json!(1));

    let (_, _, code) = run_cli(home.path(), &["stats", "show", "nobody"]);
    assert_ne!(code, 0);

    let (_, _, code) = run_cli(home.path(), &["stats", "today", "ada"]);
    assert_eq!(code, 0);
}

#[test]
fn test_achievements_list() {
    let home = TempDir::new().unwrap();
    register(home.path(), "ada");

    let (stdout, _, code) = run_cli(home.path(), &["achievements", "list", "ada"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("First Hour"));

    let (stdout, _, code) = run_cli(home.path(), &["achievements", "check", "ada"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("no new achievements"));
}

#[test]
fn test_timer_status_and_reset() {
    let home = TempDir::new().unwrap();
    register(home.path(), "ada");

    let (stdout, _, code) = run_cli(home.path(), &["timer", "status"]);
    assert_eq!(code, 0);
    let timer: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(timer["state"], serde_json::json!("idle"));

    let (_, _, code) = run_cli(
        home.path(),
        &["timer", "start", "ada", "--subject", "Math"],
    );
    assert_eq!(code, 0);

    let (_, _, code) = run_cli(home.path(), &["timer", "pause"]);
    assert_eq!(code, 0);

    let (_, _, code) = run_cli(home.path(), &["timer", "reset"]);
    assert_eq!(code, 0);
}

#[test]
fn test_config_get_set() {
    let home = TempDir::new().unwrap();

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "schedule.focus_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");

    let (_, _, code) = run_cli(
        home.path(),
        &["config", "set", "schedule.focus_minutes", "45"],
    );
    assert_eq!(code, 0);

    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "schedule.focus_minutes"]);
    assert_eq!(stdout.trim(), "45");

    let (_, _, code) = run_cli(home.path(), &["config", "get", "nope.nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_community_post_and_list() {
    let home = TempDir::new().unwrap();
    register(home.path(), "ada");

    let (_, _, code) = run_cli(
        home.path(),
        &[
            "community", "post", "ada", "Chain rule", "How does it work?", "--subject", "Math",
        ],
    );
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(home.path(), &["community", "list", "--subject", "Math"]);
    assert_eq!(code, 0);
    let posts: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(posts.as_array().unwrap().len(), 1);
}
