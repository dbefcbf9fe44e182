//! Append-only record of every interception.
//!
//! Records are grouped per member in call order. Every record also carries a
//! global sequence number so the order of calls across members can be
//! reconstructed.

use crate::value::{TypeArg, Value};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// How a member was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessKind {
    /// Method-style call, possibly with arguments and type arguments.
    Call,
    /// Property read.
    Get,
    /// Property write; the written value is the single parameter.
    Set,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccessKind::Call => "call",
            AccessKind::Get => "get",
            AccessKind::Set => "set",
        };
        write!(f, "{}", s)
    }
}

/// Snapshot of one intercepted call, read or write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionRecord {
    member: String,
    kind: AccessKind,
    parameters: Vec<Value>,
    type_arguments: Vec<TypeArg>,
    return_value: Value,
    sequence: u64,
}

impl ExecutionRecord {
    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn kind(&self) -> AccessKind {
        self.kind
    }

    /// First parameter, or `None` for a zero-argument call or a read.
    pub fn parameter(&self) -> Option<&Value> {
        self.parameters.first()
    }

    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }

    /// First type argument, or `None` when the call was not generic.
    pub fn type_argument(&self) -> Option<&TypeArg> {
        self.type_arguments.first()
    }

    pub fn type_arguments(&self) -> &[TypeArg] {
        &self.type_arguments
    }

    /// Value handed back to the caller. Always `Null` for writes.
    pub fn return_value(&self) -> &Value {
        &self.return_value
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl fmt::Display for ExecutionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ", self.sequence)?;
        match self.kind {
            AccessKind::Get => write!(f, "{}", self.member)?,
            AccessKind::Set => {
                let value = self.parameters.first().unwrap_or(&Value::Null);
                return write!(f, "{} = {}", self.member, value);
            }
            AccessKind::Call => {
                write!(f, "{}", self.member)?;
                if !self.type_arguments.is_empty() {
                    let names: Vec<&str> = self.type_arguments.iter().map(TypeArg::name).collect();
                    write!(f, "::<{}>", names.join(", "))?;
                }
                let args: Vec<String> = self.parameters.iter().map(|p| p.to_string()).collect();
                write!(f, "({})", args.join(", "))?;
            }
        }
        write!(f, " -> {}", self.return_value)
    }
}

/// Per-member execution history.
#[derive(Debug, Default)]
pub struct ExecutionLog {
    by_member: HashMap<String, Vec<ExecutionRecord>>,
    next_sequence: u64,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, stamping it with the next sequence number.
    pub fn append(
        &mut self,
        member: &str,
        kind: AccessKind,
        parameters: Vec<Value>,
        type_arguments: Vec<TypeArg>,
        return_value: Value,
    ) -> &ExecutionRecord {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let records = self.by_member.entry(member.to_string()).or_default();
        records.push(ExecutionRecord {
            member: member.to_string(),
            kind,
            parameters,
            type_arguments,
            return_value,
            sequence,
        });
        &records[records.len() - 1]
    }

    /// Most recent record for `member`.
    pub fn latest(&self, member: &str) -> Option<&ExecutionRecord> {
        self.by_member.get(member).and_then(|records| records.last())
    }

    /// Every record for `member` in call order; empty when never intercepted.
    pub fn for_member(&self, member: &str) -> &[ExecutionRecord] {
        self.by_member
            .get(member)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every record across all members, ordered by sequence.
    pub fn chronological(&self) -> Vec<&ExecutionRecord> {
        let mut all: Vec<&ExecutionRecord> = self.by_member.values().flatten().collect();
        all.sort_by_key(|record| record.sequence);
        all
    }

    pub fn count(&self, member: &str) -> usize {
        self.for_member(member).len()
    }

    /// Members that have been intercepted at least once, sorted by name.
    pub fn members(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_member.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.next_sequence as usize
    }

    pub fn is_empty(&self) -> bool {
        self.next_sequence == 0
    }
}
