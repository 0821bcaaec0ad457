//! YAML file discovery for batch passes.
//!
//! Results are sorted so a batch always visits files in the same order.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Options for file discovery.
#[derive(Debug, Clone)]
pub struct DiscoverOptions {
    /// File extensions to include, without the dot (e.g., `["yml", "yaml"]`)
    pub extensions: Vec<String>,
    /// Skip hidden files and directories
    pub skip_hidden: bool,
    /// Skip directories by name (e.g., `[".git", "node_modules"]`)
    pub skip_dirs: Vec<String>,
    /// Descend into symlinked directories (loops are reported as errors)
    pub follow_links: bool,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["yml".to_string(), "yaml".to_string()],
            skip_hidden: true,
            skip_dirs: vec!["node_modules".to_string(), "target".to_string()],
            follow_links: false,
        }
    }
}

/// True when the path carries a `.yml` or `.yaml` extension (any casing).
#[must_use]
pub fn is_yaml_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| ext == "yml" || ext == "yaml")
}

/// Result of a discovery walk.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Matching files, sorted by path.
    pub files: Vec<PathBuf>,
    /// Entries the walk could not read (path, message), in walk order.
    pub errors: Vec<(PathBuf, String)>,
}

/// Discover matching files recursively under `root`, sorted by path.
///
/// Unreadable entries do not stop the walk; they are returned in
/// [`Discovery::errors`]. A missing or non-directory root yields an empty
/// result; callers that treat a missing root as fatal check it first.
#[must_use]
pub fn discover_yaml_files(root: &Path, options: &DiscoverOptions) -> Discovery {
    let mut discovery = Discovery::default();
    if !root.is_dir() {
        return discovery;
    }

    let walker = WalkDir::new(root)
        .follow_links(options.follow_links)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry, options));
    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), &options.extensions) {
                    discovery.files.push(entry.into_path());
                }
            }
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                warn!(path = %path.display(), error = %err, "discovery walk error");
                discovery.errors.push((path, err.to_string()));
            }
        }
    }

    discovery.files.sort();
    discovery
}

fn is_skipped(entry: &DirEntry, options: &DiscoverOptions) -> bool {
    let name = entry.file_name().to_string_lossy();
    if options.skip_hidden && name.starts_with('.') {
        return true;
    }
    entry.file_type().is_dir() && options.skip_dirs.iter().any(|skip| *skip == name)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension() else {
        return false;
    };
    let ext = ext.to_string_lossy().to_lowercase();
    extensions
        .iter()
        .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(&ext))
}
