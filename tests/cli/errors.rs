//! Import errors caught before any store is contacted.

use predicates::prelude::*;

use crate::support::*;

/// Import with the fixture store switched off, so any store access would
/// fail with a missing project instead.
fn import_offline(t: &Test, csv: &str, flags: &[&str]) -> std::process::Output {
    t.write("import.csv", csv);
    t.cmd()
        .env_remove("LOCKBOX_TEST_STORE")
        .arg("import")
        .arg("import.csv")
        .args(flags)
        .output()
        .unwrap()
}

#[test]
fn test_missing_name_column() {
    let t = Test::new();

    let output = import_offline(&t, "key,value\nA,1\n", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "header has no `name` column");
}

#[test]
fn test_duplicate_columns_report_both_positions() {
    let t = Test::new();

    let output = import_offline(&t, "name,owner,value,Owner\nA,x,1,y\n", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "duplicate column `Owner` at columns 2 and 4");
}

#[test]
fn test_label_columns_naming_one_key() {
    let t = Test::new();

    let output = import_offline(&t, "name,label:env,label: env\nA,prod,dev\n", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "duplicate label `env` at columns 2 and 3");
}

#[test]
fn test_width_mismatch() {
    let t = Test::new();

    let output = import_offline(&t, "name,value,title\nA,1,t\nB,2\n", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "row 2 has 2 columns, expected 3");
}

#[test]
fn test_empty_names_are_all_listed() {
    let t = Test::new();

    let output = import_offline(&t, "name,value\n ,1\nB,2\n,3\n", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "empty name in rows 1, 3");
}

#[test]
fn test_duplicate_names() {
    let t = Test::new();

    let output = import_offline(&t, "name,value\nA,1\nB,2\nA,3\n", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "duplicate name `A` in rows 1 and 3");
}

#[test]
fn test_unterminated_quote() {
    let t = Test::new();

    let output = import_offline(&t, "name,value\nA,\"open\n", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "unterminated");
}

#[test]
fn test_update_and_upsert_conflict() {
    let t = Test::new();

    let output = import_offline(&t, "name,value\nA,1\n", &["--update", "--upsert"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "cannot be used with");
}

#[test]
fn test_missing_file() {
    let t = Test::new();

    let output = t.cmd().args(["import", "nope.csv"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "io error");
}

#[test]
fn test_valid_document_without_project() {
    let t = Test::new();

    let output = import_offline(&t, "name,value\nA,1\n", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no project configured");
    assert_stderr_contains(&output, "pass --project or set LOCKBOX_PROJECT");
}

#[test]
fn test_completions() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lockbox"));
}

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("import")
                .and(predicate::str::contains("export"))
                .and(predicate::str::contains("describe"))
                .and(predicate::str::contains("completions")),
        );
}
