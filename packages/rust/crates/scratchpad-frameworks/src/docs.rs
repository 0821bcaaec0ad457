//! Markdown reference and comparison documents.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use scratchpad_io::{DiscoverOptions, IoError, discover_yaml_files};
use tracing::{info, warn};

use crate::config::CodexConfig;
use crate::error::{FrameworkError, Result};
use crate::loader::{load_with_limit, write_text};
use crate::record::{Record, keys};
use crate::templates::title_case;

/// Reference document file name.
pub const REFERENCE_FILE: &str = "FRAMEWORK_REFERENCE.md";
/// Comparison table file name.
pub const COMPARISON_FILE: &str = "FRAMEWORK_COMPARISON.md";

const NOT_AVAILABLE: &str = "N/A";
const UNKNOWN_SIZE: &str = "Unknown";
const UNKNOWN_CHARS: &str = "?";

/// Metadata of one framework as shown in the docs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkSummary {
    /// `name`, or the file stem when absent.
    pub name: String,
    /// `version`.
    pub version: Option<String>,
    /// File name.
    pub file: String,
    /// Parent directory name.
    pub category: String,
    /// `documentation.purpose`.
    pub purpose: Option<String>,
    /// `documentation.use_case`.
    pub use_case: Option<String>,
    /// `documentation.character_count`.
    pub character_count: Option<String>,
}

impl FrameworkSummary {
    /// Summary of `record` stored at `path`.
    #[must_use]
    pub fn from_record(path: &Path, record: &Record<'_>) -> Self {
        let file_name = |p: &Path| {
            p.file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name: record.name().map_or(stem, str::to_string),
            version: record.version(),
            file: file_name(path),
            category: path.parent().map(file_name).unwrap_or_default(),
            purpose: record.doc_field(keys::PURPOSE),
            use_case: record.doc_field(keys::USE_CASE),
            character_count: record.doc_field(keys::CHARACTER_COUNT),
        }
    }
}

/// Paths written by [`write_docs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsReport {
    /// Reference document.
    pub reference: PathBuf,
    /// Comparison table.
    pub comparison: PathBuf,
    /// Frameworks included.
    pub frameworks: usize,
}

/// Summaries of every readable record under `frameworks_dir`, sorted by path.
///
/// Unreadable, unparseable and non-mapping files are logged and skipped.
#[must_use]
pub fn collect_summaries(frameworks_dir: &Path, max_bytes: u64) -> Vec<FrameworkSummary> {
    let mut summaries = Vec::new();
    let discovery = discover_yaml_files(frameworks_dir, &DiscoverOptions::default());
    for (path, message) in &discovery.errors {
        warn!(path = %path.display(), error = %message, "could not read entry");
    }
    for path in discovery.files {
        match load_with_limit(&path, max_bytes) {
            Ok(Some(value)) => match Record::new(&value) {
                Some(record) => summaries.push(FrameworkSummary::from_record(&path, &record)),
                None => warn!(path = %path.display(), "skipping non-mapping document"),
            },
            Ok(None) => warn!(path = %path.display(), "skipping empty document"),
            Err(err) => warn!(error = %err, "could not process framework"),
        }
    }
    summaries
}

/// Render the quick-reference document.
#[must_use]
pub fn render_reference(summaries: &[FrameworkSummary], generated_at: DateTime<Utc>) -> String {
    let mut by_category: BTreeMap<&str, Vec<&FrameworkSummary>> = BTreeMap::new();
    for summary in summaries {
        by_category.entry(summary.category.as_str()).or_default().push(summary);
    }

    let mut md = String::new();
    md.push_str("# Framework Quick Reference\n\n");
    md.push_str("_Auto-generated documentation from YAML metadata_\n\n");
    let _ = writeln!(
        md,
        "**Last Updated**: {}\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    md.push_str("---\n\n## Table of Contents\n\n");
    for category in by_category.keys() {
        let _ = writeln!(md, "- [{}](#{})", title_case(category), anchor(category));
    }
    md.push_str("\n---\n\n");

    for (category, mut frameworks) in by_category {
        frameworks.sort_by(|a, b| a.name.cmp(&b.name));
        let _ = writeln!(md, "## {}\n", title_case(category));
        for fw in frameworks {
            let _ = writeln!(md, "### {}\n", fw.name);
            let _ = writeln!(
                md,
                "**File**: `{}` | **Version**: {} | **Size**: ~{} chars\n",
                fw.file,
                fw.version.as_deref().unwrap_or(NOT_AVAILABLE),
                fw.character_count.as_deref().unwrap_or(UNKNOWN_SIZE),
            );
            if let Some(purpose) = &fw.purpose {
                let _ = writeln!(md, "**Purpose**: {purpose}\n");
            }
            if let Some(use_case) = &fw.use_case {
                let _ = writeln!(md, "**Use Cases**: {use_case}\n");
            }
            md.push_str("---\n\n");
        }
    }
    md
}

/// Render the comparison table, sorted by category then name.
#[must_use]
pub fn render_comparison(summaries: &[FrameworkSummary]) -> String {
    let mut rows: Vec<&FrameworkSummary> = summaries.iter().collect();
    rows.sort_by(|a, b| (&a.category, &a.name).cmp(&(&b.category, &b.name)));

    let mut md = String::from("# Framework Comparison Table\n\n");
    md.push_str("| Framework | Category | Version | Size (chars) |\n");
    md.push_str("|-----------|----------|---------|--------------|\n");
    for fw in rows {
        let version = fw
            .version
            .as_deref()
            .map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("`{v}`"));
        let _ = writeln!(
            md,
            "| {} | {} | {} | {} |",
            table_cell(&fw.name),
            table_cell(&title_case(&fw.category)),
            version,
            fw.character_count.as_deref().unwrap_or(UNKNOWN_CHARS),
        );
    }
    md
}

/// Generate both documents into `config.docs_dir`.
///
/// # Errors
/// `MissingRoot` when the frameworks directory does not exist; I/O failures
/// creating the docs directory or writing either file.
pub fn write_docs(config: &CodexConfig, generated_at: DateTime<Utc>) -> Result<DocsReport> {
    if !config.frameworks_dir.is_dir() {
        return Err(FrameworkError::MissingRoot(config.frameworks_dir.clone()));
    }
    let summaries = collect_summaries(&config.frameworks_dir, config.max_file_size);

    std::fs::create_dir_all(&config.docs_dir)
        .map_err(|err| FrameworkError::io(&config.docs_dir, IoError::System(err)))?;
    let reference = config.docs_dir.join(REFERENCE_FILE);
    let comparison = config.docs_dir.join(COMPARISON_FILE);
    write_text(&reference, &render_reference(&summaries, generated_at))?;
    write_text(&comparison, &render_comparison(&summaries))?;

    info!(
        frameworks = summaries.len(),
        docs_dir = %config.docs_dir.display(),
        "documentation generated"
    );
    Ok(DocsReport {
        reference,
        comparison,
        frameworks: summaries.len(),
    })
}

fn anchor(category: &str) -> String {
    category
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

fn table_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
