/// End-to-end CLI tests
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::io::Write;

const GREETING: &str = "tests/fixtures/scripts/greeting.json";

fn sleight() -> Command {
    Command::cargo_bin("sleight").unwrap()
}

#[test]
fn help_lists_subcommands() {
    sleight()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn run_prints_text_report() {
    sleight()
        .args(["run", GREETING])
        .assert()
        .success()
        .stdout(predicate::str::contains("greeting"))
        .stdout(predicate::str::contains("\"Hello John\""))
        .stdout(predicate::str::contains("FirstName = \"Another\""))
        .stdout(predicate::str::contains("never intercepted"));
}

#[test]
fn run_json_resolves_stubs() {
    let output = sleight()
        .args(["--quiet", "run", GREETING, "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    let outcomes = report["outcomes"].as_array().unwrap();
    assert_eq!(outcomes[3]["response"]["value"], "Hello John");
    assert_eq!(outcomes[4]["response"]["value"], "Hi");
    assert!(outcomes[8]["response"]["value"].is_null());
    assert_eq!(
        outcomes[9]["response"]["record"]["type_arguments"],
        serde_json::json!([])
    );
    assert_eq!(outcomes[10]["response"]["records"].as_array().unwrap().len(), 2);
    assert!(outcomes[11]["response"]["record"].is_null());

    let log = report["log"].as_array().unwrap();
    assert_eq!(log.len(), 6);
    let type_args = log[2]["type_arguments"].as_array().unwrap();
    assert!(type_args[0].as_str().unwrap().ends_with("String"));
    assert_eq!(type_args[1], "i32");
    assert_eq!(log[3]["parameters"][0]["type"], "handle");
    assert_eq!(log[4]["kind"], "set");
    assert_eq!(report["stubs"].as_array().unwrap().len(), 2);
}

#[test]
fn validate_accepts_good_script() {
    sleight()
        .args(["validate", GREETING])
        .assert()
        .success()
        .stdout(predicate::str::contains("12 step(s) OK"));
}

#[test]
fn validate_reports_bad_value() {
    sleight()
        .args(["validate", "tests/fixtures/scripts/bad_value.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("step 1"))
        .stderr(predicate::str::contains("date"));
}

#[test]
fn run_reports_unknown_op_with_path() {
    sleight()
        .args(["run", "tests/fixtures/scripts/bad_op.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("steps[1]"))
        .stderr(predicate::str::contains("reset"));
}

#[test]
fn missing_script_fails() {
    let dir = tempfile::tempdir().unwrap();
    sleight()
        .args(["run"])
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script"));
}

#[test]
fn run_accepts_temp_script() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"steps": [
            {{"op": "stub", "member": "Total", "parameters": [1, 2], "returns": 3}},
            {{"op": "call", "member": "Total", "args": [1, 2]}},
            {{"op": "call", "member": "Total", "args": [2, 1]}}
        ]}}"#
    )
    .unwrap();

    let output = sleight()
        .args(["-q", "run", "--output", "json"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["outcomes"][1]["response"]["value"], 3);
    assert!(report["outcomes"][2]["response"]["value"].is_null());
}
