use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sleight_mock::{ExecutionRecord, Value};

/// A replayable mock session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<MockRequest>,
}

/// One step of a script. Values are raw JSON until the replay parser turns
/// them into mock values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum MockRequest {
    Stub {
        member: String,
        #[serde(default)]
        parameters: Option<Vec<JsonValue>>,
        returns: JsonValue,
    },
    Call {
        member: String,
        #[serde(default)]
        args: Vec<JsonValue>,
        #[serde(default)]
        type_args: Vec<String>,
    },
    Get {
        member: String,
    },
    Set {
        member: String,
        value: JsonValue,
    },
    ExecutionFor {
        member: String,
    },
    ExecutionsFor {
        member: String,
    },
}

impl MockRequest {
    pub fn member(&self) -> &str {
        match self {
            MockRequest::Stub { member, .. }
            | MockRequest::Call { member, .. }
            | MockRequest::Get { member }
            | MockRequest::Set { member, .. }
            | MockRequest::ExecutionFor { member }
            | MockRequest::ExecutionsFor { member } => member,
        }
    }

    pub fn op(&self) -> &'static str {
        match self {
            MockRequest::Stub { .. } => "stub",
            MockRequest::Call { .. } => "call",
            MockRequest::Get { .. } => "get",
            MockRequest::Set { .. } => "set",
            MockRequest::ExecutionFor { .. } => "execution_for",
            MockRequest::ExecutionsFor { .. } => "executions_for",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MockResponse {
    Stubbed,
    Value { value: Value },
    Assigned,
    Execution { record: Option<ExecutionRecord> },
    Executions { records: Vec<ExecutionRecord> },
}
