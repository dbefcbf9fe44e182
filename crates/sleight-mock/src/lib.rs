//! A dynamic test double.
//!
//! [`DynamicMock`] answers to any member name without a predeclared
//! interface. Each call, property read or property write is resolved against
//! the configured stubs and recorded for later inspection.
//!
//! Modules:
//! - [`value`]    — Opaque parameter/response values and type arguments.
//! - [`log`]      — Execution records and the append-only execution log.
//! - [`registry`] — Stub entries and the resolution algorithm.
//! - [`builder`]  — Fluent stub declaration.
//! - [`dynamic`]  — The mock façade and interception.
//!
//! ```
//! use sleight_mock::{invoke, DynamicMock};
//!
//! let mock = DynamicMock::new();
//! mock.stub("SayHello").returns("Hello");
//! mock.stub("SayHello").with_parameters(["John Doe"]).returns("Hello John");
//!
//! assert_eq!(invoke!(mock.SayHello("John Doe")), "Hello John");
//! assert_eq!(invoke!(mock.SayHello("Anything Else")), "Hello");
//! assert_eq!(mock.executions_for("SayHello").len(), 2);
//! ```

pub mod builder;
pub mod dynamic;
pub mod log;
mod macros;
pub mod registry;
pub mod value;

pub use builder::StubBuilder;
pub use dynamic::{DynamicMock, Invocation};
pub use log::{AccessKind, ExecutionLog, ExecutionRecord};
pub use registry::{Resolution, StubEntry, StubRegistry};
pub use value::{Handle, Object, Opaque, TypeArg, Value};
