#![allow(clippy::doc_markdown)]

//! scratchpad-frameworks - Framework record processing
//!
//! Batch passes over a tree of reasoning-framework YAML records: markup
//! conversion, metadata backfill, canonical normalization, document markers,
//! plus read-only docs, inventory and validation.
//!
//! # Architecture
//!
//! ```text
//! scratchpad-frameworks/src/
//! ├── lib.rs        # Re-exports (this file)
//! ├── error.rs      # FrameworkError enum (thiserror)
//! ├── config.rs     # CodexConfig: directory resolution
//! ├── record.rs     # Record view, well-known keys, RecordState
//! ├── loader.rs     # parse_record / load / save
//! ├── canonical.rs  # Canonical YAML emitter
//! ├── rewriter.rs   # content / legacy_content -> framework.structure
//! ├── templates.rs  # Metadata templates and backfill
//! ├── normalize.rs  # Canonical re-emit, document markers
//! ├── docs.rs       # Reference and comparison markdown
//! ├── inventory.rs  # Size + SHA-256 inventory
//! ├── validate.rs   # Syntax and required-key validation
//! └── batch.rs      # Sequential tree passes, BatchReport
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use scratchpad_frameworks::{CodexConfig, RewriteConfig, convert_tree};
//!
//! let config = CodexConfig::from_env(None);
//! let report = convert_tree(&config, &RewriteConfig::default())?;
//! assert!(!report.has_errors());
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod batch;
mod canonical;
mod config;
mod docs;
mod error;
mod inventory;
mod loader;
mod normalize;
mod record;
mod rewriter;
mod templates;
mod validate;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use batch::{
    BatchReport, FileOutcome, backfill_tree, convert_tree, mark_tree, normalize_tree, run_batch,
};
pub use canonical::{DOCUMENT_START, to_canonical_yaml};
pub use config::{BASE_DIR_ENV, CodexConfig, DOCS_SUBDIR, FRAMEWORKS_SUBDIR};
pub use docs::{
    COMPARISON_FILE, DocsReport, FrameworkSummary, REFERENCE_FILE, collect_summaries,
    render_comparison, render_reference, write_docs,
};
pub use error::{FrameworkError, Result};
pub use inventory::{InventoryEntry, InventoryReport, SKIP_DIRS, scan as scan_inventory};
pub use loader::{load, load_with_limit, parse_record, save};
pub use normalize::{Normalized, add_marker_file, ensure_document_marker, normalize_file, normalize_text};
pub use record::{REQUIRED_KEYS, Record, RecordState, is_blank, keys, scalar_text};
pub use rewriter::{
    DEFAULT_SENTINEL, Rewrite, RewriteConfig, SkipReason, rewrite, rewrite_file,
    structure_to_value,
};
pub use templates::{
    Backfill, FALLBACK_VERSION, FilledField, TEMPLATE_RULES, Template, TemplateRule, backfill,
    backfill_file, lookup, title_case,
};
pub use validate::{
    FileVerdict, ValidateOptions, check_required_keys, parse_documents, validate_all,
    validate_file, yaml_inputs,
};
