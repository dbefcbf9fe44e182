//! The mock façade.
//!
//! [`DynamicMock`] accepts calls, reads and writes against any member name.
//! Each interception is normalised into an [`Invocation`], resolved against
//! the stub registry, appended to the execution log, and answered with the
//! resolved value (or `Null`).

use crate::builder::StubBuilder;
use crate::log::{AccessKind, ExecutionLog, ExecutionRecord};
use crate::registry::{StubEntry, StubRegistry};
use crate::value::{TypeArg, Value};
use std::cell::RefCell;
use tracing::{debug, trace};

/// Normalised shape of one interception.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub member: String,
    pub kind: AccessKind,
    pub parameters: Vec<Value>,
    pub type_arguments: Vec<TypeArg>,
}

impl Invocation {
    pub fn call(member: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            kind: AccessKind::Call,
            parameters: Vec::new(),
            type_arguments: Vec::new(),
        }
    }

    pub fn get(member: impl Into<String>) -> Self {
        Self {
            kind: AccessKind::Get,
            ..Self::call(member)
        }
    }

    pub fn set(member: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            kind: AccessKind::Set,
            parameters: vec![value.into()],
            ..Self::call(member)
        }
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.parameters.push(value.into());
        self
    }

    pub fn args<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.parameters.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn type_arg(mut self, type_arg: TypeArg) -> Self {
        self.type_arguments.push(type_arg);
        self
    }

    pub fn type_args(mut self, type_args: impl IntoIterator<Item = TypeArg>) -> Self {
        self.type_arguments.extend(type_args);
        self
    }
}

/// A test double that answers to any member name.
///
/// Interception takes `&self` so the mock can be shared by reference with the
/// code under test. State lives in `RefCell`s: one mock belongs to one thread.
#[derive(Debug, Default)]
pub struct DynamicMock {
    stubs: RefCell<StubRegistry>,
    log: RefCell<ExecutionLog>,
}

impl DynamicMock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start declaring a stub for `member`.
    pub fn stub(&self, member: impl Into<String>) -> StubBuilder<'_> {
        StubBuilder::new(self, member.into())
    }

    pub(crate) fn commit_stub(&self, entry: StubEntry) {
        debug!(
            member = %entry.member,
            method_level = entry.is_method_level(),
            response = %entry.response,
            "stub registered"
        );
        self.stubs.borrow_mut().insert(entry);
    }

    /// Intercept a normalised invocation and return the resolved value.
    ///
    /// Writes never resolve a response: they are recorded with a `Null`
    /// return value and do not influence later reads.
    pub fn intercept(&self, invocation: Invocation) -> Value {
        let Invocation {
            member,
            kind,
            parameters,
            type_arguments,
        } = invocation;

        let resolved = match kind {
            AccessKind::Set => Value::Null,
            AccessKind::Call | AccessKind::Get => {
                let stubs = self.stubs.borrow();
                let resolution = stubs.resolve(&member, &parameters);
                trace!(member = %member, source = resolution.source(), "resolved");
                resolution.into_value()
            }
        };

        let mut log = self.log.borrow_mut();
        let record = log.append(&member, kind, parameters, type_arguments, resolved.clone());
        debug!(
            member = %member,
            kind = %kind,
            arity = record.parameters().len(),
            sequence = record.sequence(),
            "intercepted"
        );

        resolved
    }

    /// Method-style call with positional arguments.
    pub fn call<I>(&self, member: &str, args: I) -> Value
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.intercept(Invocation::call(member).args(args))
    }

    /// Generic-style call: type arguments travel next to the positional ones.
    pub fn call_generic<T, I>(&self, member: &str, type_args: T, args: I) -> Value
    where
        T: IntoIterator<Item = TypeArg>,
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.intercept(Invocation::call(member).type_args(type_args).args(args))
    }

    /// Property read.
    pub fn get(&self, member: &str) -> Value {
        self.intercept(Invocation::get(member))
    }

    /// Property write.
    pub fn set(&self, member: &str, value: impl Into<Value>) {
        self.intercept(Invocation::set(member, value));
    }

    /// Most recent execution of `member`, if it was ever intercepted.
    pub fn execution_for(&self, member: &str) -> Option<ExecutionRecord> {
        self.log.borrow().latest(member).cloned()
    }

    /// All executions of `member` in call order.
    pub fn executions_for(&self, member: &str) -> Vec<ExecutionRecord> {
        self.log.borrow().for_member(member).to_vec()
    }

    /// All executions across members in call order.
    pub fn executions(&self) -> Vec<ExecutionRecord> {
        self.log
            .borrow()
            .chronological()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn call_count(&self, member: &str) -> usize {
        self.log.borrow().count(member)
    }

    pub fn was_intercepted(&self, member: &str) -> bool {
        self.call_count(member) > 0
    }

    /// Committed stub entries in registration order.
    pub fn stubs(&self) -> Vec<StubEntry> {
        self.stubs.borrow().entries()
    }
}
