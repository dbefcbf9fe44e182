//! Scriptable driver for the [`sleight_mock`] dynamic test double.
//!
//! The mock engine lives in the `sleight-mock` crate and is re-exported here
//! as [`mock`]. This crate adds a JSON script format ([`protocol`]), a replay
//! engine ([`replay`]) and the `sleight` command-line front end ([`cli`]).

pub mod cli;
pub mod error;
pub mod protocol;
pub mod replay;

pub use error::{Result, SleightError};
pub use sleight_mock as mock;
pub use sleight_mock::{DynamicMock, ExecutionRecord, StubEntry, TypeArg, Value};
