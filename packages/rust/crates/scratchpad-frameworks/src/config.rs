//! Target directory resolution.
//!
//! Precedence: explicit CLI argument, then `SCRATCHPAD_DIR` (a base directory
//! whose `frameworks/` child is the target), then `./frameworks`.

use std::ffi::OsString;
use std::path::PathBuf;

use scratchpad_io::DEFAULT_MAX_BYTES;

/// Environment variable naming the repository base directory.
pub const BASE_DIR_ENV: &str = "SCRATCHPAD_DIR";

/// Frameworks subdirectory under the base directory.
pub const FRAMEWORKS_SUBDIR: &str = "frameworks";

/// Docs subdirectory under the base directory.
pub const DOCS_SUBDIR: &str = "docs";

/// Resolved directories and limits for one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodexConfig {
    /// Repository base directory.
    pub base_dir: PathBuf,
    /// Tree of framework YAML files.
    pub frameworks_dir: PathBuf,
    /// Output directory for generated documentation.
    pub docs_dir: PathBuf,
    /// Per-file read limit in bytes.
    pub max_file_size: u64,
}

impl Default for CodexConfig {
    fn default() -> Self {
        Self::from_base(PathBuf::from("."))
    }
}

impl CodexConfig {
    /// Config rooted at `base_dir`.
    #[must_use]
    pub fn from_base(base_dir: PathBuf) -> Self {
        Self {
            frameworks_dir: base_dir.join(FRAMEWORKS_SUBDIR),
            docs_dir: base_dir.join(DOCS_SUBDIR),
            base_dir,
            max_file_size: DEFAULT_MAX_BYTES,
        }
    }

    /// Resolve from an optional CLI directory and an optional env value.
    ///
    /// A CLI directory is the frameworks tree itself; its parent becomes the
    /// base directory. Empty env values are ignored.
    #[must_use]
    pub fn resolve(cli_dir: Option<PathBuf>, env_base: Option<OsString>) -> Self {
        if let Some(frameworks_dir) = cli_dir {
            let base_dir = frameworks_dir
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            return Self {
                docs_dir: base_dir.join(DOCS_SUBDIR),
                frameworks_dir,
                base_dir,
                max_file_size: DEFAULT_MAX_BYTES,
            };
        }

        match env_base.filter(|value| !value.is_empty()) {
            Some(base) => Self::from_base(PathBuf::from(base)),
            None => Self::default(),
        }
    }

    /// Resolve using the process environment.
    #[must_use]
    pub fn from_env(cli_dir: Option<PathBuf>) -> Self {
        Self::resolve(cli_dir, std::env::var_os(BASE_DIR_ENV))
    }

    /// Override the docs output directory.
    #[must_use]
    pub fn with_docs_dir(mut self, docs_dir: PathBuf) -> Self {
        self.docs_dir = docs_dir;
        self
    }
}
