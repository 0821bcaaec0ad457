#![allow(clippy::doc_markdown)]

//! scratchpad-io - Safe file I/O for framework documents
//!
//! Every batch pass in the workspace reads and writes framework files through
//! this crate so the same guarantees hold everywhere.
//!
//! # Features
//!
//! - **Bounded reads**: size limit, binary detection, strict UTF-8
//! - **Atomic saves**: temp file in the target directory, fsync, rename
//! - **Discovery**: sorted, recursive `*.yml` / `*.yaml` listing
//!
//! # Architecture
//!
//! ```text
//! scratchpad-io/src/
//! ├── lib.rs       # Re-exports (this file)
//! ├── error.rs     # IoError enum
//! ├── detect.rs    # Binary detection & decoding
//! ├── read.rs      # Bounded synchronous reads
//! ├── write.rs     # Atomic writes
//! └── discover.rs  # YAML file discovery
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use scratchpad_io::{read_text_safe, write_atomic, DEFAULT_MAX_BYTES};
//!
//! let text = read_text_safe("frameworks/core/scratchpad-2.7.yml", DEFAULT_MAX_BYTES)?;
//! write_atomic("frameworks/core/scratchpad-2.7.yml", text.as_bytes())?;
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod detect;
mod discover;
mod error;
mod read;
mod write;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use detect::{decode_buffer, is_binary};
pub use discover::{DiscoverOptions, Discovery, discover_yaml_files, is_yaml_path};
pub use error::IoError;
pub use read::read_text_safe;
pub use write::write_atomic;

/// Default per-file read limit (1 MiB). Framework documents are kilobytes.
pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;
