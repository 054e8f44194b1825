//! End-to-end `lockbox import` tests against the fixture store.

use std::fs;

use serde_json::json;

use crate::support::*;

fn seeded() -> Test {
    let t = Test::init();
    t.seed(json!({
        "secrets": {
            "A": { "versions": ["old"], "labels": { "env": "dev" } }
        }
    }));
    t
}

#[test]
fn test_create_only_skips_existing() {
    let t = seeded();

    let output = t.import("name,value\nA,new\nB,b\n", &[]);
    assert_success(&output);
    assert_stdout_contains(&output, "row 1: skip (already exists, mode=create-only)");
    assert_stdout_contains(&output, "row 2: create");
    assert_stdout_contains(&output, "1 created, 0 updated, 1 skipped, 0 failed");

    assert_eq!(t.versions("A"), ["old"]);
    assert_eq!(t.versions("B"), ["b"]);
}

#[test]
fn test_update_only_skips_missing() {
    let t = seeded();

    let output = t.import("name,value\nA,new\nB,b\n", &["--update"]);
    assert_success(&output);
    assert_stdout_contains(&output, "row 2: skip (does not exist, mode=update-only)");

    assert_eq!(t.versions("A"), ["old", "new"]);
    assert!(t.store()["secrets"]["B"].is_null());
}

#[test]
fn test_upsert_creates_and_updates_with_labels() {
    let t = seeded();

    let output = t.import(
        "name,value,label:env,label:team\nA,new,prod,core\nB,b,dev,\n",
        &["--upsert"],
    );
    assert_success(&output);
    assert_stdout_contains(&output, "1 created, 1 updated, 0 skipped, 0 failed");

    assert_eq!(t.versions("A"), ["old", "new"]);
    assert_eq!(t.label("A", "env").as_deref(), Some("prod"));
    assert_eq!(t.label("A", "team").as_deref(), Some("core"));
    assert_eq!(t.versions("B"), ["b"]);
    assert_eq!(t.label("B", "team").as_deref(), Some(""));
}

#[test]
fn test_partial_failure_continues_and_exits_nonzero() {
    let t = Test::init();
    t.seed(json!({ "secrets": {}, "deny": ["B"] }));

    let output = t.import("name,value\nA,a\nB,b\nC,c\n", &["--upsert"]);
    assert_failure(&output);
    assert_stdout_contains(&output, "row 2: create failed: permission denied on B");
    assert_stdout_contains(&output, "2 created, 0 updated, 0 skipped, 1 failed");
    assert_stderr_contains(&output, "1 row(s) failed");

    assert_eq!(t.versions("A"), ["a"]);
    assert_eq!(t.versions("C"), ["c"]);
    assert!(t.store()["secrets"]["B"].is_null());
}

#[test]
fn test_dry_run_changes_nothing() {
    let t = seeded();
    let store_before = fs::read(t.store_path()).unwrap();
    let config_before = t.read(".lockbox.toml");

    let output = t.import(
        "name,value,title\nA,new,Key A\nB,b,Key B\n",
        &["--upsert", "--dry-run", "--update-config"],
    );
    assert_success(&output);
    assert_stdout_contains(&output, "row 1: would update, would merge metadata");
    assert_stdout_contains(&output, "row 2: would create, would merge metadata");
    assert_stdout_contains(&output, "nothing changed");

    assert_eq!(fs::read(t.store_path()).unwrap(), store_before);
    assert_eq!(t.read(".lockbox.toml"), config_before);
}

#[test]
fn test_update_config_merges_and_preserves_keys() {
    let t = seeded();
    t.write(
        ".lockbox.toml",
        r#"[lockbox]
version = "0.1.0"
project = "demo"

[credentials.A]
title = "Old title"
owner = "alice"
rotation_days = 90
"#,
    );

    let output = t.import(
        "name,title,team,rotation_days\nA,New title,core,90\n",
        &["--update", "--update-config"],
    );
    assert_success(&output);
    assert_stdout_contains(&output, "metadata merged");

    // No value column: metadata only
    assert_eq!(t.versions("A"), ["old"]);

    let config = t.config();
    let entry = &config["credentials"]["A"];
    assert_eq!(entry["title"].as_str(), Some("New title"));
    assert_eq!(entry["owner"].as_str(), Some("alice"));
    assert_eq!(entry["team"].as_str(), Some("core"));
    assert_eq!(entry["rotation_days"].as_integer(), Some(90));
}

#[test]
fn test_metadata_skipped_for_failed_rows() {
    let t = Test::init();
    t.seed(json!({ "secrets": {}, "deny": ["B"] }));

    let output = t.import(
        "name,value,title\nA,a,Key A\nB,b,Key B\n",
        &["--update-config"],
    );
    assert_failure(&output);

    let config = t.config();
    assert_eq!(config["credentials"]["A"]["title"].as_str(), Some("Key A"));
    assert!(config["credentials"].get("B").is_none());
}

#[test]
fn test_create_without_value_is_skipped() {
    let t = Test::init();

    let output = t.import("name,title\nNEW,Something\n", &["--upsert"]);
    assert_success(&output);
    assert_stdout_contains(&output, "skip (no value, cannot create)");
    assert!(t.store()["secrets"]["NEW"].is_null());
}

#[test]
fn test_multiline_and_quoted_values() {
    let t = Test::init();

    let output = t.import(
        "\u{feff}name,value\r\nCERT,\"line1\r\nline2\"\r\nQUOTE,\"say \"\"hi\"\", ok\"\r\n",
        &[],
    );
    assert_success(&output);

    assert_eq!(t.versions("CERT"), ["line1\r\nline2"]);
    assert_eq!(t.versions("QUOTE"), ["say \"hi\", ok"]);
}

#[test]
fn test_structural_error_leaves_store_untouched() {
    let t = seeded();
    let before = fs::read(t.store_path()).unwrap();

    let output = t.import("name,value\nB,1\nB,2\n", &["--upsert"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "duplicate name `B` in rows 1 and 2");

    assert_eq!(fs::read(t.store_path()).unwrap(), before);
}

#[test]
fn test_import_from_stdin() {
    let t = Test::init();

    let output = t
        .cmd()
        .args(["import", "-"])
        .write_stdin("name,value\nA,piped\n")
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(t.versions("A"), ["piped"]);
}
