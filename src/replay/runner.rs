use crate::protocol::{MockRequest, Script};
use crate::replay::invoker::invoke_step;
use crate::replay::parser::ValueParser;
use crate::replay::report::{ReplayReport, StepOutcome};
use crate::Result;
use sleight_mock::DynamicMock;
use tracing::info;

/// Replays scripts against a fresh [`DynamicMock`].
#[derive(Debug, Default)]
pub struct ScriptRunner {
    mock: DynamicMock,
    parser: ValueParser,
}

impl ScriptRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every step in order and collect the report.
    ///
    /// Stops at the first step whose values cannot be parsed.
    #[tracing::instrument(
        skip_all,
        fields(script = script.name.as_deref().unwrap_or("<unnamed>"), steps = script.steps.len())
    )]
    pub fn run(mut self, script: &Script) -> Result<ReplayReport> {
        info!("Replaying script");

        let mut outcomes = Vec::with_capacity(script.steps.len());
        for (step, request) in script.steps.iter().enumerate() {
            let response = invoke_step(&self.mock, &mut self.parser, step, request)?;
            outcomes.push(StepOutcome {
                step,
                op: request.op(),
                member: request.member().to_string(),
                response,
            });
        }

        let report = ReplayReport {
            script: script.name.clone(),
            outcomes,
            log: self.mock.executions(),
            stubs: self.mock.stubs(),
        };
        info!(
            executions = report.log.len(),
            stubs = report.stubs.len(),
            "Replay finished"
        );
        Ok(report)
    }
}

/// Check that every value in `script` parses, without touching a mock.
///
/// Returns the number of steps checked.
pub fn validate_script(script: &Script) -> Result<usize> {
    let mut parser = ValueParser::new();
    for (step, request) in script.steps.iter().enumerate() {
        match request {
            MockRequest::Stub {
                parameters,
                returns,
                ..
            } => {
                parser.parse(step, returns)?;
                if let Some(parameters) = parameters {
                    parser.parse_all(step, parameters)?;
                }
            }
            MockRequest::Call { args, .. } => {
                parser.parse_all(step, args)?;
            }
            MockRequest::Set { value, .. } => {
                parser.parse(step, value)?;
            }
            MockRequest::Get { .. }
            | MockRequest::ExecutionFor { .. }
            | MockRequest::ExecutionsFor { .. } => {}
        }
    }
    Ok(script.steps.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::MockResponse;
    use crate::replay::loader::parse_script;
    use crate::SleightError;
    use sleight_mock::Value;

    const GREETING: &str = r#"{
        "name": "greeting",
        "steps": [
            {"op": "stub", "member": "SayHello", "returns": "Hello"},
            {"op": "stub", "member": "SayHello", "parameters": ["John Doe"], "returns": "Hello John"},
            {"op": "stub", "member": "SayHello", "returns": "Hi"},
            {"op": "call", "member": "SayHello", "args": ["John Doe"]},
            {"op": "call", "member": "SayHello", "args": ["Anything Else"]},
            {"op": "set", "member": "FirstName", "value": "Another"},
            {"op": "get", "member": "FirstName"},
            {"op": "executions_for", "member": "FirstName"}
        ]
    }"#;

    fn value_of(report: &ReplayReport, step: usize) -> &Value {
        match &report.outcomes[step].response {
            MockResponse::Value { value } => value,
            other => panic!("step {} answered {:?}", step, other),
        }
    }

    #[test]
    fn replays_redefinition_scenario() {
        let script = parse_script(GREETING).unwrap();
        let report = ScriptRunner::new().run(&script).unwrap();

        assert_eq!(value_of(&report, 3), &Value::from("Hello John"));
        assert_eq!(value_of(&report, 4), &Value::from("Hi"));
        assert!(value_of(&report, 6).is_null());

        match &report.outcomes[7].response {
            MockResponse::Executions { records } => assert_eq!(records.len(), 2),
            other => panic!("unexpected response {:?}", other),
        }
        assert_eq!(report.log.len(), 4);
        assert_eq!(report.stubs.len(), 2);
        assert_eq!(report.script.as_deref(), Some("greeting"));
    }

    #[test]
    fn stops_on_first_bad_step() {
        let script = parse_script(
            r#"{"steps": [
                {"op": "call", "member": "A"},
                {"op": "call", "member": "B", "args": [{"type": "nope", "value": 1}]}
            ]}"#,
        )
        .unwrap();
        let err = ScriptRunner::new().run(&script).unwrap_err();
        assert!(matches!(err, SleightError::InvalidValue { step: 1, .. }));
    }

    #[test]
    fn validate_checks_values_without_running() {
        let script = parse_script(GREETING).unwrap();
        assert_eq!(validate_script(&script).unwrap(), 8);

        let bad = parse_script(
            r#"{"steps": [{"op": "set", "member": "A", "value": {"type": "int", "value": "x"}}]}"#,
        )
        .unwrap();
        assert!(validate_script(&bad).is_err());
    }

    #[test]
    fn handles_match_by_identity_across_steps() {
        let script = parse_script(
            r#"{"steps": [
                {"op": "stub", "member": "Find", "parameters": [{"type": "handle", "value": "g1"}], "returns": "found"},
                {"op": "call", "member": "Find", "args": [{"type": "handle", "value": "g1"}]},
                {"op": "call", "member": "Find", "args": [{"type": "handle", "value": "g2"}]}
            ]}"#,
        )
        .unwrap();
        let report = ScriptRunner::new().run(&script).unwrap();
        assert_eq!(value_of(&report, 1), &Value::from("found"));
        assert!(value_of(&report, 2).is_null());
    }
}
