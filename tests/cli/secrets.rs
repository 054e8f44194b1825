//! Tests for get, set, list, describe and rm.

use serde_json::{json, Value};

use crate::support::*;

#[test]
fn test_set_then_get() {
    let t = Test::init();

    let output = t.set(
        "API_KEY",
        "hunter2",
        &[
            "--label",
            "env=dev",
            "--title",
            "API key",
            "--attr",
            "owner=bob",
        ],
    );
    assert_success(&output);
    assert_stdout_contains(&output, "created API_KEY");

    let output = t.get("API_KEY");
    assert_success(&output);
    assert_eq!(stdout(&output), "hunter2\n");

    assert_eq!(t.label("API_KEY", "env").as_deref(), Some("dev"));
    let config = t.config();
    assert_eq!(
        config["credentials"]["API_KEY"]["title"].as_str(),
        Some("API key")
    );
    assert_eq!(
        config["credentials"]["API_KEY"]["owner"].as_str(),
        Some("bob")
    );
}

#[test]
fn test_set_existing_adds_version() {
    let t = Test::init();
    assert_success(&t.set("API_KEY", "one", &[]));

    let output = t.set("API_KEY", "two", &[]);
    assert_success(&output);
    assert_stdout_contains(&output, "updated API_KEY");
    assert_eq!(t.versions("API_KEY"), ["one", "two"]);
}

#[test]
fn test_set_without_metadata_leaves_config_alone() {
    let t = Test::init();
    let before = t.read(".lockbox.toml");

    assert_success(&t.set("API_KEY", "one", &["--label", "env=dev"]));
    assert_eq!(t.read(".lockbox.toml"), before);
}

#[test]
fn test_get_missing_fails() {
    let t = Test::init();

    let output = t.get("NOPE");
    assert_failure(&output);
    assert_stderr_contains(&output, "secret not found: NOPE");
}

#[test]
fn test_list_json() {
    let t = Test::init();
    t.seed(json!({
        "secrets": {
            "B": { "versions": ["b"], "labels": { "env": "prod" } },
            "A": { "versions": ["a"], "labels": { "env": "dev" } }
        }
    }));

    let output = t.list_json();
    assert_success(&output);
    let listed: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(listed["count"], 2);
    assert_eq!(listed["secrets"][0]["name"], "A");
    assert_eq!(listed["secrets"][1]["labels"]["env"], "prod");

    let output = t
        .cmd()
        .args(["list", "--filter", "env=prod"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "B");
    assert_stdout_excludes(&output, "  A");
}

#[test]
fn test_describe() {
    let t = Test::init();
    assert_success(&t.set(
        "DB_URL",
        "postgres://",
        &[
            "--title",
            "Database",
            "--label",
            "env=prod",
            "--attr",
            "owner=alice",
        ],
    ));

    let output = t.cmd().args(["describe", "DB_URL"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "Database");
    assert_stdout_contains(&output, "env");
    assert_stdout_contains(&output, "prod");
    assert_stdout_contains(&output, "alice");
    assert_stdout_excludes(&output, "postgres://");
}

#[test]
fn test_rm_deletes_secret_and_metadata() {
    let t = Test::init();
    assert_success(&t.set("API_KEY", "one", &["--title", "API key"]));

    let output = t.rm("API_KEY");
    assert_success(&output);
    assert_stdout_contains(&output, "removed: API_KEY");

    assert!(t.store()["secrets"]["API_KEY"].is_null());
    let config = t.config();
    assert!(config
        .get("credentials")
        .and_then(|c| c.get("API_KEY"))
        .is_none());
}

#[test]
fn test_rm_missing_fails() {
    let t = Test::init();

    let output = t.rm("NOPE");
    assert_failure(&output);
    assert_stderr_contains(&output, "secret not found");
}
