//! Read-only YAML syntax validation.

use std::path::{Path, PathBuf};

use scratchpad_io::is_yaml_path;
use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{FrameworkError, Result};
use crate::loader::read_text;
use crate::record::Record;

/// Validation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Also require the top-level record keys.
    pub strict: bool,
    /// Per-file read limit.
    pub max_bytes: u64,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_bytes: scratchpad_io::DEFAULT_MAX_BYTES,
        }
    }
}

/// Verdict for one file.
#[derive(Debug)]
pub struct FileVerdict {
    /// File that was checked.
    pub path: PathBuf,
    /// Number of documents on success.
    pub result: Result<usize>,
}

impl FileVerdict {
    /// True when the file passed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Keep only `.yml` / `.yaml` paths, in the given order.
#[must_use]
pub fn yaml_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths.iter().filter(|p| is_yaml_path(p)).cloned().collect()
}

/// Parse every document of a (possibly multi-document) stream.
///
/// # Errors
/// The first parser error.
pub fn parse_documents(text: &str) -> std::result::Result<Vec<Value>, serde_yaml::Error> {
    serde_yaml::Deserializer::from_str(text)
        .map(Value::deserialize)
        .collect()
}

/// Require [`crate::record::REQUIRED_KEYS`] on a record.
///
/// # Errors
/// `MissingField` naming the first absent key; `Parse` when the document is
/// not a mapping.
pub fn check_required_keys(path: &Path, value: &Value) -> Result<()> {
    let Some(record) = Record::new(value) else {
        return Err(FrameworkError::Parse {
            path: path.to_path_buf(),
            message: "document is not a mapping".to_string(),
        });
    };
    match record.missing_required().first() {
        Some(field) => Err(FrameworkError::MissingField {
            path: path.to_path_buf(),
            field: (*field).to_string(),
        }),
        None => Ok(()),
    }
}

/// Validate one file; returns the number of documents.
///
/// # Errors
/// Read failures, parse failures and, in strict mode, missing keys on any
/// non-empty document.
pub fn validate_file(path: &Path, options: ValidateOptions) -> Result<usize> {
    let text = read_text(path, options.max_bytes)?;
    let documents = parse_documents(&text).map_err(|err| FrameworkError::parse(path, &err))?;
    if options.strict {
        for document in documents.iter().filter(|doc| !doc.is_null()) {
            check_required_keys(path, document)?;
        }
    }
    Ok(documents.len())
}

/// Validate every YAML path in `paths`, in order.
#[must_use]
pub fn validate_all(paths: &[PathBuf], options: ValidateOptions) -> Vec<FileVerdict> {
    yaml_inputs(paths)
        .into_iter()
        .map(|path| {
            let result = validate_file(&path, options);
            FileVerdict { path, result }
        })
        .collect()
}
