//! End-to-end `lockbox export` tests against the fixture store.

use serde_json::json;

use crate::support::*;

const CONFIG: &str = r#"[lockbox]
version = "0.1.0"
project = "demo"

[credentials.A]
title = "Key A"
owner = "alice"
"#;

fn seeded() -> Test {
    let t = Test::new();
    t.write(".lockbox.toml", CONFIG);
    t.seed(json!({
        "secrets": {
            "A": { "versions": ["a1", "a2"], "labels": { "env": "prod" } },
            "B": { "versions": ["line1\nline2"], "labels": { "team": "core" } }
        }
    }));
    t
}

#[test]
fn test_export_without_values() {
    let t = seeded();

    let output = t.export(&[]);
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "name,title,label:env,label:team,owner\nA,Key A,prod,,alice\nB,,,core,\n"
    );
}

#[test]
fn test_export_with_values_uses_latest_version() {
    let t = seeded();

    let output = t.export(&["--with-values"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.starts_with("name,value,title,"));
    assert!(out.contains("A,a2,Key A,prod,,alice\n"));
    assert!(out.contains("B,\"line1\nline2\",,,core,\n"));
    assert!(!out.contains("a1"));
}

#[test]
fn test_export_filter() {
    let t = seeded();

    let output = t.export(&["--filter", "env=prod"]);
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "name,title,label:env,owner\nA,Key A,prod,alice\n"
    );
}

#[test]
fn test_export_bad_filter_is_usage_error() {
    let t = seeded();

    let output = t.export(&["--filter", "env"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "expected label=value");
}

#[test]
fn test_export_to_file() {
    let t = seeded();

    let output = t.export(&["--with-values", "-o", "out.csv"]);
    assert_success(&output);
    assert_stdout_contains(&output, "exported to out.csv");
    assert!(t.read("out.csv").contains("A,a2,Key A"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(t.path("out.csv"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn test_export_import_round_trip() {
    let source = seeded();
    assert_success(&source.export(&["--with-values", "-o", "out.csv"]));
    let document = source.read("out.csv");

    let target = Test::init();
    let output = target.import(&document, &["--update-config"]);
    assert_success(&output);

    let output = target.export(&["--with-values"]);
    assert_success(&output);
    assert_eq!(stdout(&output), document);
}
