//! Script loading.
//!
//! Reads a script file and deserialises it into a [`Script`]. Errors carry
//! the JSON path of the offending node (`steps[2].op`) so broken scripts are
//! easy to fix. This module knows nothing about running scripts.

use crate::protocol::Script;
use crate::{Result, SleightError};
use std::path::Path;
use tracing::{debug, info};

/// Read and parse the script at `path`.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_script(path: &Path) -> Result<Script> {
    info!("Loading script");

    let text = std::fs::read_to_string(path).map_err(|source| SleightError::ScriptRead {
        path: path.to_path_buf(),
        source,
    })?;

    let script = parse_script(&text)?;
    debug!(steps = script.steps.len(), "Script parsed");
    Ok(script)
}

/// Parse script JSON held in memory.
pub fn parse_script(text: &str) -> Result<Script> {
    let deserializer = &mut serde_json::Deserializer::from_str(text);
    serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let path = err.path().to_string();
        SleightError::ScriptParse {
            path,
            message: err.into_inner().to_string(),
        }
    })
}
