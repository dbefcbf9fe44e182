//! Script replay sub-system.
//!
//! Sub-modules:
//! - [`loader`]  — Script file reading and JSON diagnostics.
//! - [`parser`]  — JSON → mock value conversion and type-argument lookup.
//! - [`invoker`] — Applies a single step to the mock.
//! - [`runner`]  — Public façade; replays a whole script.
//! - [`report`]  — Replay results and their text/JSON rendering.

pub mod invoker;
pub mod loader;
pub mod parser;
pub mod report;
pub mod runner;

pub use loader::{load_script, parse_script};
pub use parser::{parse_type_arg, ValueParser};
pub use report::{ReplayReport, StepOutcome};
pub use runner::{validate_script, ScriptRunner};
