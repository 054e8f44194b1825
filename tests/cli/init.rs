//! Tests for `lockbox init`.

use crate::support::*;

#[test]
fn test_init_writes_config() {
    let t = Test::new();

    let output = t.init_cmd();
    assert_success(&output);
    assert_stdout_contains(&output, "initialized .lockbox.toml");

    let config = t.config();
    assert_eq!(config["lockbox"]["project"].as_str(), Some("demo"));
    assert!(config["lockbox"]["version"].as_str().is_some());
}

#[test]
fn test_init_with_prefix() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["init", "--prefix", "team-"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "no project set");

    let config = t.config();
    assert_eq!(config["lockbox"]["prefix"].as_str(), Some("team-"));
    assert!(config["lockbox"].get("project").is_none());
}

#[test]
fn test_init_rejects_bad_prefix() {
    let t = Test::new();

    let output = t.cmd().args(["init", "--prefix", "a/b"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid prefix");
    assert!(!t.path(".lockbox.toml").exists());
}

#[test]
fn test_init_twice_fails() {
    let t = Test::init();

    let output = t.init_cmd();
    assert_failure(&output);
    assert_stderr_contains(&output, "already initialized");
}
