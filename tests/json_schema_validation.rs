use assert_cmd::Command;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;

#[test]
fn test_json_report_schema_validation() {
    let script_path = "tests/fixtures/scripts/greeting.json";
    let schema_path = "tests/schemas/replay_report.json";

    // --quiet keeps logs off stderr; stdout carries only the JSON report
    let mut cmd = Command::cargo_bin("sleight").unwrap();
    let output = cmd
        .arg("--quiet")
        .arg("run")
        .arg(script_path)
        .arg("--output")
        .arg("json")
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "Command failed: {:?}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("Stdout is not valid UTF-8");
    let json_val: Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("Failed to parse JSON output ({}): {}", e, stdout));

    let schema_content = fs::read_to_string(schema_path).expect("Failed to read schema file");
    let schema_json: Value =
        serde_json::from_str(&schema_content).expect("Failed to parse schema JSON");

    let compiled = JSONSchema::compile(&schema_json).expect("Failed to compile schema");
    let result = compiled.validate(&json_val);

    if let Err(errors) = result {
        let mut error_msgs = Vec::new();
        for error in errors {
            error_msgs.push(format!(
                "Property: {}, Error: {}",
                error.instance_path, error
            ));
        }
        panic!("JSON Schema validation failed:\n{}", error_msgs.join("\n"));
    }
}
