//! CLI integration tests for the `dmntab` binary.
//!
//! Uses `assert_cmd` to spawn the binary and verify exit codes, stdout
//! content, and stderr content. Fixture files are written into a
//! tempdir per test.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn dmntab() -> Command {
    cargo_bin_cmd!("dmntab")
}

/// Write a two-rule UNIQUE age table and return its path.
fn write_age_table(dir: &TempDir) -> PathBuf {
    let doc = serde_json::json!({
        "decisions": [
            {
                "id": "categorize",
                "hit_policy": "UNIQUE",
                "inputs": [ { "name": "age", "type": "number" } ],
                "outputs": [ { "name": "category", "type": "string" } ],
                "rules": [
                    { "when": ["< 18"], "then": ["\"minor\""] },
                    { "when": [">= 18"], "then": ["\"adult\""] }
                ]
            },
            {
                "id": "collect_all",
                "hit_policy": "COLLECT",
                "inputs": [ { "name": "age", "type": "number" } ],
                "outputs": [ { "name": "category", "type": "string" } ],
                "rules": [
                    { "when": ["> 0"], "then": ["\"positive\""] },
                    { "when": ["< 100"], "then": ["\"small\""] }
                ]
            }
        ]
    });
    let path = dir.path().join("tables.json");
    fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
    path
}

// ──────────────────────────────────────────────
// Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    dmntab()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Decides inputs against a decision table",
        ));
}

#[test]
fn version_exits_0() {
    dmntab().arg("--version").assert().success();
}

// ──────────────────────────────────────────────
// Decide subcommand
// ──────────────────────────────────────────────

#[test]
fn decide_inline_inputs_text_output() {
    let dir = TempDir::new().unwrap();
    let table = write_age_table(&dir);
    dmntab()
        .args(["decide", table.to_str().unwrap(), "-i", r#"{"age": 15}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("category = \"minor\""));
}

#[test]
fn decide_json_output() {
    let dir = TempDir::new().unwrap();
    let table = write_age_table(&dir);
    dmntab()
        .args([
            "decide",
            table.to_str().unwrap(),
            "-i",
            r#"{"age": 40}"#,
            "--output",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"category\": \"adult\""));
}

#[test]
fn decide_selects_decision_by_id() {
    let dir = TempDir::new().unwrap();
    let table = write_age_table(&dir);
    dmntab()
        .args([
            "decide",
            table.to_str().unwrap(),
            "-d",
            "collect_all",
            "-i",
            r#"{"age": 5}"#,
            "--output",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("positive"))
        .stdout(predicate::str::contains("small"));
}

#[test]
fn decide_unknown_decision_exits_1() {
    let dir = TempDir::new().unwrap();
    let table = write_age_table(&dir);
    dmntab()
        .args(["decide", table.to_str().unwrap(), "-d", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no decision with id 'nope'"));
}

#[test]
fn decide_inputs_file() {
    let dir = TempDir::new().unwrap();
    let table = write_age_table(&dir);
    let inputs = dir.path().join("inputs.json");
    fs::write(&inputs, r#"{"age": 17}"#).unwrap();
    dmntab()
        .args([
            "decide",
            table.to_str().unwrap(),
            "--inputs-file",
            inputs.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("minor"));
}

#[test]
fn decide_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let table = write_age_table(&dir);
    let out = dir.path().join("result.json");
    dmntab()
        .args([
            "decide",
            table.to_str().unwrap(),
            "-i",
            r#"{"age": 15}"#,
            "--output-file",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("result written to"));
    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("\"category\": \"minor\""));
}

#[test]
fn decide_no_match_reports_empty_result() {
    let dir = TempDir::new().unwrap();
    let doc = serde_json::json!({
        "id": "narrow",
        "hit_policy": "UNIQUE",
        "inputs": [ { "name": "age", "type": "number" } ],
        "outputs": [ { "name": "category" } ],
        "rules": [ { "when": ["< 18"], "then": ["\"minor\""] } ]
    });
    let table = dir.path().join("table.json");
    fs::write(&table, doc.to_string()).unwrap();
    dmntab()
        .args(["decide", table.to_str().unwrap(), "-i", r#"{"age": 40}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("no rule matched"));
}

#[test]
fn decide_policy_violation_exits_1() {
    let dir = TempDir::new().unwrap();
    let doc = serde_json::json!({
        "id": "overlap",
        "hit_policy": "UNIQUE",
        "inputs": [ { "name": "age", "type": "number" } ],
        "outputs": [ { "name": "category" } ],
        "rules": [
            { "when": ["> 0"], "then": ["\"a\""] },
            { "when": ["< 100"], "then": ["\"b\""] }
        ]
    });
    let table = dir.path().join("table.json");
    fs::write(&table, doc.to_string()).unwrap();
    dmntab()
        .args(["decide", table.to_str().unwrap(), "-i", r#"{"age": 50}"#])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("policy violation"));
}

#[test]
fn decide_missing_table_file_exits_1() {
    dmntab()
        .args(["decide", "no_such_table_xyz.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("table file not found"));
}

#[test]
fn decide_invalid_inline_inputs_exits_1() {
    let dir = TempDir::new().unwrap();
    let table = write_age_table(&dir);
    dmntab()
        .args(["decide", table.to_str().unwrap(), "-i", "not json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid JSON inputs"));
}

// ──────────────────────────────────────────────
// Validate subcommand
// ──────────────────────────────────────────────

#[test]
fn validate_valid_definition() {
    let dir = TempDir::new().unwrap();
    let table = write_age_table(&dir);
    dmntab()
        .args(["validate", table.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("definition is valid"))
        .stdout(predicate::str::contains("categorize: UNIQUE policy"));
}

#[test]
fn validate_rejects_bad_output_cell() {
    let dir = TempDir::new().unwrap();
    let doc = serde_json::json!({
        "id": "bad",
        "hit_policy": "UNIQUE",
        "inputs": [ { "name": "age" } ],
        "outputs": [ { "name": "category" } ],
        "rules": [ { "when": ["-"], "then": ["< 18"] } ]
    });
    let table = dir.path().join("table.json");
    fs::write(&table, doc.to_string()).unwrap();
    dmntab()
        .args(["validate", table.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid definition"));
}

#[test]
fn quiet_suppresses_output_but_keeps_exit_code() {
    let dir = TempDir::new().unwrap();
    let table = write_age_table(&dir);
    dmntab()
        .args([
            "decide",
            table.to_str().unwrap(),
            "-i",
            r#"{"age": 15}"#,
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    dmntab()
        .args(["validate", "missing.json", "--quiet"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::is_empty());
}
