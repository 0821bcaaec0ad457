//! Sequential batch passes over a frameworks tree.
//!
//! Files are discovered up front and processed one at a time in sorted path
//! order. A per-file failure is logged, recorded and never stops the batch;
//! so is a directory the walk cannot read. Only a missing root is fatal.

use std::path::{Path, PathBuf};

use scratchpad_io::{DiscoverOptions, discover_yaml_files};
use tracing::{debug, error, info, warn};

use crate::config::CodexConfig;
use crate::error::{FrameworkError, Result};
use crate::normalize::{Normalized, add_marker_file, normalize_file};
use crate::rewriter::{Rewrite, RewriteConfig, SkipReason, rewrite_file};
use crate::templates::{Backfill, backfill_file};

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// File rewritten.
    Changed,
    /// File already in the target state.
    Unchanged,
    /// File not eligible for this pass.
    Skipped(String),
}

/// Statistics for a batch pass.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files visited.
    pub processed: usize,
    /// Files rewritten.
    pub changed: usize,
    /// Files not eligible for the pass.
    pub skipped: usize,
    /// Failures (path, message), in visit order.
    pub errors: Vec<(PathBuf, String)>,
    /// Rewritten files, in visit order.
    pub modified_files: Vec<PathBuf>,
}

impl BatchReport {
    /// Create a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when at least one file failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn record(&mut self, path: &Path, outcome: Result<FileOutcome>) {
        self.processed += 1;
        match outcome {
            Ok(FileOutcome::Changed) => {
                info!(path = %path.display(), "updated");
                self.changed += 1;
                self.modified_files.push(path.to_path_buf());
            }
            Ok(FileOutcome::Unchanged) => debug!(path = %path.display(), "unchanged"),
            Ok(FileOutcome::Skipped(reason)) => {
                debug!(path = %path.display(), %reason, "skipped");
                self.skipped += 1;
            }
            Err(err) => {
                error!(error = %err, "failed");
                self.errors.push((path.to_path_buf(), err.to_string()));
            }
        }
    }
}

/// Run `pass` over every YAML file under `root`.
///
/// # Errors
/// `MissingRoot` when `root` is not a directory, before any file is touched.
pub fn run_batch<F>(root: &Path, mut pass: F) -> Result<BatchReport>
where
    F: FnMut(&Path) -> Result<FileOutcome>,
{
    if !root.is_dir() {
        return Err(FrameworkError::MissingRoot(root.to_path_buf()));
    }

    let discovery = discover_yaml_files(root, &DiscoverOptions::default());
    info!(root = %root.display(), files = discovery.files.len(), "batch started");

    let mut report = BatchReport::new();
    for (path, message) in discovery.errors {
        error!(path = %path.display(), error = %message, "unreadable entry");
        report.errors.push((path, message));
    }
    for path in &discovery.files {
        report.record(path, pass(path));
    }

    info!(
        processed = report.processed,
        changed = report.changed,
        skipped = report.skipped,
        errors = report.errors.len(),
        "batch finished"
    );
    Ok(report)
}

/// Fill blank metadata from templates across the tree.
///
/// # Errors
/// `MissingRoot`.
pub fn backfill_tree(config: &CodexConfig) -> Result<BatchReport> {
    run_batch(&config.frameworks_dir, |path| {
        Ok(match backfill_file(path)? {
            Backfill::Filled { .. } => FileOutcome::Changed,
            Backfill::Complete => FileOutcome::Unchanged,
            Backfill::Skipped(reason) => FileOutcome::Skipped(reason.to_string()),
        })
    })
}

/// Re-emit every record in canonical form.
///
/// # Errors
/// `MissingRoot`.
pub fn normalize_tree(config: &CodexConfig) -> Result<BatchReport> {
    run_batch(&config.frameworks_dir, |path| {
        Ok(match normalize_file(path, config.max_file_size)? {
            Normalized::Rewritten => FileOutcome::Changed,
            Normalized::Unchanged => FileOutcome::Unchanged,
            Normalized::Empty => FileOutcome::Skipped("empty document".to_string()),
        })
    })
}

/// Convert markup content into `framework.structure` across the tree.
///
/// Legacy blobs without the sentinel tag are reported as warnings and left
/// byte-for-byte untouched.
///
/// # Errors
/// `MissingRoot`.
pub fn convert_tree(config: &CodexConfig, rewrite: &RewriteConfig) -> Result<BatchReport> {
    run_batch(&config.frameworks_dir, |path| {
        Ok(match rewrite_file(path, rewrite)? {
            Rewrite::Converted { .. } => FileOutcome::Changed,
            Rewrite::Unchanged(SkipReason::AlreadyStructured) => FileOutcome::Unchanged,
            Rewrite::Unchanged(SkipReason::UnknownFormat { sentinel }) => {
                let err = FrameworkError::UnknownFormat {
                    path: path.to_path_buf(),
                    sentinel,
                };
                warn!(error = %err, "skipping legacy content");
                FileOutcome::Skipped(err.to_string())
            }
            Rewrite::Unchanged(reason) => FileOutcome::Skipped(reason.to_string()),
        })
    })
}

/// Prepend missing `---` markers across the tree.
///
/// # Errors
/// `MissingRoot`.
pub fn mark_tree(config: &CodexConfig) -> Result<BatchReport> {
    run_batch(&config.frameworks_dir, |path| {
        Ok(if add_marker_file(path, config.max_file_size)? {
            FileOutcome::Changed
        } else {
            FileOutcome::Unchanged
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = BatchReport::new();
        report.record(Path::new("a.yml"), Ok(FileOutcome::Changed));
        report.record(Path::new("b.yml"), Ok(FileOutcome::Unchanged));
        report.record(Path::new("c.yml"), Ok(FileOutcome::Skipped("x".into())));
        report.record(
            Path::new("d.yml"),
            Err(FrameworkError::MissingField {
                path: PathBuf::from("d.yml"),
                field: "name".into(),
            }),
        );
        assert_eq!(report.processed, 4);
        assert_eq!(report.changed, 1);
        assert_eq!(report.skipped, 1);
        assert!(report.has_errors());
        assert_eq!(report.modified_files, vec![PathBuf::from("a.yml")]);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let result = run_batch(Path::new("/nonexistent/frameworks"), |_| Ok(FileOutcome::Unchanged));
        assert!(matches!(result, Err(FrameworkError::MissingRoot(_))));
    }
}
