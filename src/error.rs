//! Error type for script loading and replay.
//!
//! The mock itself never fails; everything here comes from turning files and
//! JSON into mock operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, SleightError>;

#[derive(Debug, Error)]
pub enum SleightError {
    /// The script file could not be read.
    #[error("Failed to read script {path}: {source}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The script is not valid JSON or does not match the step schema.
    #[error("Invalid script at `{path}`: {message}")]
    ScriptParse { path: String, message: String },

    /// A value inside a step could not be turned into a mock value.
    #[error("Invalid value in step {step}: {message}")]
    InvalidValue { step: usize, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
