//! Replay results and their rendering.
//!
//! A [`ReplayReport`] captures what every step answered plus the final state
//! of the mock: the full execution log in call order and the committed stubs.

use crate::protocol::MockResponse;
use crate::Result;
use colored::Colorize;
use serde::Serialize;
use sleight_mock::{ExecutionRecord, StubEntry};
use std::fmt;

/// Outcome of one script step.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub op: &'static str,
    pub member: String,
    pub response: MockResponse,
}

/// Everything a replay produced.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub script: Option<String>,
    pub outcomes: Vec<StepOutcome>,
    pub log: Vec<ExecutionRecord>,
    pub stubs: Vec<StubEntry>,
}

impl ReplayReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn describe_response(response: &MockResponse) -> String {
    match response {
        MockResponse::Stubbed => "stubbed".to_string(),
        MockResponse::Assigned => "assigned".to_string(),
        MockResponse::Value { value } => value.to_string(),
        MockResponse::Execution { record: Some(record) } => record.to_string(),
        MockResponse::Execution { record: None } => "never intercepted".to_string(),
        MockResponse::Executions { records } => format!("{} record(s)", records.len()),
    }
}

fn describe_stub(entry: &StubEntry) -> String {
    match &entry.parameter_filter {
        None => format!("{} -> {}", entry.member, entry.response),
        Some(filter) => {
            let params: Vec<String> = filter.iter().map(|p| p.to_string()).collect();
            format!("{}({}) -> {}", entry.member, params.join(", "), entry.response)
        }
    }
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.script {
            writeln!(f, "{} {}", "Script:".bold(), name)?;
        }

        writeln!(f, "{}", "Steps:".bold())?;
        for outcome in &self.outcomes {
            writeln!(
                f,
                "  [{}] {} {} -> {}",
                outcome.step,
                outcome.op.cyan(),
                outcome.member,
                describe_response(&outcome.response)
            )?;
        }

        writeln!(f, "{}", "Execution log:".bold())?;
        if self.log.is_empty() {
            writeln!(f, "  {}", "(empty)".dimmed())?;
        }
        for record in &self.log {
            writeln!(f, "  {}", record)?;
        }

        writeln!(f, "{}", "Stubs:".bold())?;
        if self.stubs.is_empty() {
            writeln!(f, "  {}", "(none)".dimmed())?;
        }
        for entry in &self.stubs {
            writeln!(f, "  {}", describe_stub(entry))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleight_mock::Value;

    #[test]
    fn stubs_render_with_their_filter() {
        let method = StubEntry::method("SayHello", Value::from("Hello"));
        let scoped = StubEntry::with_parameters(
            "SayHello",
            vec![Value::from("John Doe")],
            Value::from("Hello John"),
        );
        assert_eq!(describe_stub(&method), r#"SayHello -> "Hello""#);
        assert_eq!(describe_stub(&scoped), r#"SayHello("John Doe") -> "Hello John""#);
    }

    #[test]
    fn responses_render_compactly() {
        assert_eq!(describe_response(&MockResponse::Stubbed), "stubbed");
        assert_eq!(
            describe_response(&MockResponse::Execution { record: None }),
            "never intercepted"
        );
        assert_eq!(
            describe_response(&MockResponse::Executions { records: vec![] }),
            "0 record(s)"
        );
    }

    #[test]
    fn json_report_has_top_level_sections() {
        let report = ReplayReport {
            script: None,
            outcomes: vec![],
            log: vec![],
            stubs: vec![],
        };
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert!(json["script"].is_null());
        assert!(json["outcomes"].as_array().unwrap().is_empty());
        assert!(json["log"].is_array());
        assert!(json["stubs"].is_array());
    }
}
