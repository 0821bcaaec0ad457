//! Error types for framework record processing.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use std::path::PathBuf;

use scratchpad_io::IoError;
use thiserror::Error;

/// Error types for per-file framework operations.
///
/// Every variant except `MissingRoot` is scoped to one file; batch passes
/// record it and move on to the next file.
#[derive(Error, Debug)]
pub enum FrameworkError {
    /// Malformed YAML syntax.
    #[error("Parse error in {}: {message}", .path.display())]
    Parse {
        /// Offending file.
        path: PathBuf,
        /// Parser message, including line and column when known.
        message: String,
    },

    /// A required key is absent from a record.
    #[error("Missing required field '{field}' in {}", .path.display())]
    MissingField {
        /// Offending file.
        path: PathBuf,
        /// Top-level key that was expected.
        field: String,
    },

    /// Legacy content without the expected sentinel opening tag.
    #[error("Unknown content format in {}: no <{sentinel}> tag", .path.display())]
    UnknownFormat {
        /// Offending file.
        path: PathBuf,
        /// Sentinel tag name that was looked for.
        sentinel: String,
    },

    /// File could not be read or written.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying failure.
        source: IoError,
    },

    /// Target directory does not exist.
    #[error("Frameworks directory not found: {}", .0.display())]
    MissingRoot(PathBuf),
}

impl FrameworkError {
    /// Wrap an I/O failure with the file it happened on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: IoError) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a YAML parser failure with the file it happened on.
    pub(crate) fn parse(path: impl Into<PathBuf>, err: &serde_yaml::Error) -> Self {
        Self::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Result alias for framework operations.
pub type Result<T> = std::result::Result<T, FrameworkError>;
