//! Loading and saving framework records.

use std::path::Path;

use scratchpad_io::{DEFAULT_MAX_BYTES, read_text_safe, write_atomic};
use serde_yaml::Value;
use tracing::debug;

use crate::canonical::to_canonical_yaml;
use crate::error::{FrameworkError, Result};

/// Parse one record from text.
///
/// Returns `Ok(None)` for documents with no content (blank, comments only,
/// markers only, or an explicit null).
///
/// # Errors
/// Returns the parser error for malformed YAML.
pub fn parse_record(text: &str) -> std::result::Result<Option<Value>, serde_yaml::Error> {
    if is_effectively_empty(text) {
        return Ok(None);
    }
    match serde_yaml::from_str::<Value>(text)? {
        Value::Null => Ok(None),
        value => Ok(Some(value)),
    }
}

/// Read and parse the record stored at `path`.
///
/// # Errors
/// `FrameworkError::Io` when the file cannot be read (missing, binary, too
/// large), `FrameworkError::Parse` for malformed YAML.
pub fn load(path: &Path) -> Result<Option<Value>> {
    load_with_limit(path, DEFAULT_MAX_BYTES)
}

/// [`load`] with an explicit size limit.
///
/// # Errors
/// Same as [`load`].
pub fn load_with_limit(path: &Path, max_bytes: u64) -> Result<Option<Value>> {
    let text = read_text(path, max_bytes)?;
    parse_record(&text).map_err(|err| FrameworkError::parse(path, &err))
}

/// Serialize `value` canonically and write it atomically to `path`.
///
/// # Errors
/// `FrameworkError::Io` when the write fails; the previous file is untouched.
pub fn save(path: &Path, value: &Value) -> Result<()> {
    write_text(path, &to_canonical_yaml(value))
}

pub(crate) fn read_text(path: &Path, max_bytes: u64) -> Result<String> {
    read_text_safe(path, max_bytes).map_err(|err| FrameworkError::io(path, err))
}

pub(crate) fn write_text(path: &Path, text: &str) -> Result<()> {
    write_atomic(path, text.as_bytes()).map_err(|err| FrameworkError::io(path, err))?;
    debug!(path = %path.display(), "saved");
    Ok(())
}

fn is_effectively_empty(text: &str) -> bool {
    text.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}
