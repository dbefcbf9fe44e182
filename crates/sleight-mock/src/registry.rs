//! Stub storage and resolution.
//!
//! Each member holds at most one method-level response and at most one
//! response per distinct parameter list. Parameter-level responses win over
//! the method-level one regardless of registration order.

use crate::value::Value;
use serde::Serialize;
use std::collections::HashMap;

/// A configured response for a member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StubEntry {
    pub member: String,
    /// `None` matches any call to `member`.
    pub parameter_filter: Option<Vec<Value>>,
    pub response: Value,
}

impl StubEntry {
    pub fn method(member: impl Into<String>, response: Value) -> Self {
        Self {
            member: member.into(),
            parameter_filter: None,
            response,
        }
    }

    pub fn with_parameters(
        member: impl Into<String>,
        parameters: Vec<Value>,
        response: Value,
    ) -> Self {
        Self {
            member: member.into(),
            parameter_filter: Some(parameters),
            response,
        }
    }

    pub fn is_method_level(&self) -> bool {
        self.parameter_filter.is_none()
    }
}

/// Outcome of looking up a response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// An entry whose filter equals the call's parameters.
    Parameters(&'a Value),
    /// The member's method-level entry.
    Method(&'a Value),
    Unresolved,
}

impl Resolution<'_> {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Resolution::Parameters(v) | Resolution::Method(v) => Some(v),
            Resolution::Unresolved => None,
        }
    }

    /// The response to hand back; unresolved lookups yield `Null`.
    pub fn into_value(self) -> Value {
        self.value().cloned().unwrap_or_default()
    }

    pub fn source(&self) -> &'static str {
        match self {
            Resolution::Parameters(_) => "parameters",
            Resolution::Method(_) => "method",
            Resolution::Unresolved => "unresolved",
        }
    }
}

#[derive(Debug, Default)]
struct MemberStubs {
    method: Option<Value>,
    // Linear scan: `Value` is not `Hash` (floats, opaque payloads).
    by_parameters: Vec<(Vec<Value>, Value)>,
    // Registration order of this member's entries, for `entries()`.
    order: Vec<Option<usize>>,
}

/// Per-member collection of stub entries.
#[derive(Debug, Default)]
pub struct StubRegistry {
    members: HashMap<String, MemberStubs>,
    // Member names in first-registration order.
    member_order: Vec<String>,
}

impl StubRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit an entry, replacing any entry with the same member and filter.
    pub fn insert(&mut self, entry: StubEntry) {
        if !self.members.contains_key(&entry.member) {
            self.member_order.push(entry.member.clone());
        }
        let stubs = self.members.entry(entry.member).or_default();

        match entry.parameter_filter {
            None => {
                if stubs.method.replace(entry.response).is_none() {
                    stubs.order.push(None);
                }
            }
            Some(filter) => {
                match stubs.by_parameters.iter_mut().find(|(f, _)| *f == filter) {
                    Some((_, response)) => *response = entry.response,
                    None => {
                        stubs.order.push(Some(stubs.by_parameters.len()));
                        stubs.by_parameters.push((filter, entry.response));
                    }
                }
            }
        }
    }

    /// Find the response for a call to `member` with `parameters`.
    pub fn resolve(&self, member: &str, parameters: &[Value]) -> Resolution<'_> {
        let Some(stubs) = self.members.get(member) else {
            return Resolution::Unresolved;
        };

        if !parameters.is_empty() {
            if let Some((_, response)) = stubs
                .by_parameters
                .iter()
                .find(|(filter, _)| filter.as_slice() == parameters)
            {
                return Resolution::Parameters(response);
            }
        }

        match &stubs.method {
            Some(response) => Resolution::Method(response),
            None => Resolution::Unresolved,
        }
    }

    /// Snapshot of every committed entry in registration order.
    pub fn entries(&self) -> Vec<StubEntry> {
        let mut entries = Vec::new();
        for member in &self.member_order {
            let Some(stubs) = self.members.get(member) else {
                continue;
            };
            for slot in &stubs.order {
                let entry = match slot {
                    None => stubs
                        .method
                        .clone()
                        .map(|response| StubEntry::method(member.clone(), response)),
                    Some(i) => stubs.by_parameters.get(*i).map(|(filter, response)| {
                        StubEntry::with_parameters(member.clone(), filter.clone(), response.clone())
                    }),
                };
                entries.extend(entry);
            }
        }
        entries
    }

    /// Number of committed entries.
    pub fn len(&self) -> usize {
        self.members.values().map(|stubs| stubs.order.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
