//! Fluent stub declaration.

use crate::dynamic::DynamicMock;
use crate::registry::StubEntry;
use crate::value::Value;

/// Configuration handle returned by [`DynamicMock::stub`].
///
/// Nothing reaches the registry until [`StubBuilder::returns`] is called.
#[must_use = "a stub is only registered once `returns` is called"]
pub struct StubBuilder<'m> {
    mock: &'m DynamicMock,
    member: String,
    filter: Option<Vec<Value>>,
}

impl<'m> StubBuilder<'m> {
    pub(crate) fn new(mock: &'m DynamicMock, member: String) -> Self {
        Self {
            mock,
            member,
            filter: None,
        }
    }

    /// Narrow the stub to calls whose arguments equal `parameters` exactly.
    ///
    /// An empty list still makes a parameter-level entry. Zero-argument calls
    /// only resolve through the method-level entry, so it never matches.
    pub fn with_parameters<I, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.filter = Some(parameters.into_iter().map(Into::into).collect());
        self
    }

    /// Commit the stub with `value` as its response.
    pub fn returns(self, value: impl Into<Value>) {
        let response = value.into();
        let entry = match self.filter {
            Some(parameters) => StubEntry::with_parameters(self.member, parameters, response),
            None => StubEntry::method(self.member, response),
        };
        self.mock.commit_stub(entry);
    }
}
