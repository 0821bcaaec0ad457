//! File inventory: every file under a root with its size and SHA-256.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};
use walkdir::{DirEntry, WalkDir};

use crate::error::{FrameworkError, Result};

/// Directory names never descended into.
pub const SKIP_DIRS: [&str; 5] = [".git", ".venv", "node_modules", "__pycache__", "target"];

/// Inventory of one root directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryReport {
    /// Absolute root path.
    pub root: String,
    /// Files in walk order (sorted by name per directory).
    pub files: Vec<InventoryEntry>,
}

/// One inventoried file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InventoryEntry {
    /// File hashed successfully.
    File {
        /// Path relative to the root.
        path: String,
        /// Size in bytes.
        size: u64,
        /// Lowercase hex SHA-256 of the content.
        sha256: String,
    },
    /// File could not be read.
    Error {
        /// Path relative to the root.
        path: String,
        /// Failure description.
        error: String,
    },
}

impl InventoryReport {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Serialization failure (not expected for this shape).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Entries that failed.
    pub fn errors(&self) -> impl Iterator<Item = &InventoryEntry> {
        self.files
            .iter()
            .filter(|entry| matches!(entry, InventoryEntry::Error { .. }))
    }
}

/// Walk `root` and hash every regular file.
///
/// # Errors
/// `MissingRoot` when `root` is not a directory. Per-file failures become
/// `InventoryEntry::Error` entries.
pub fn scan(root: &Path) -> Result<InventoryReport> {
    if !root.is_dir() {
        return Err(FrameworkError::MissingRoot(root.to_path_buf()));
    }
    let absolute = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());

    let mut files = Vec::new();
    let walker = WalkDir::new(&absolute)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));
    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() => {
                let path = relative(&absolute, entry.path());
                files.push(match hash_file(entry.path()) {
                    Ok((size, sha256)) => InventoryEntry::File { path, size, sha256 },
                    Err(err) => InventoryEntry::Error {
                        path,
                        error: err.to_string(),
                    },
                });
            }
            Ok(_) => {}
            Err(err) => {
                files.push(InventoryEntry::Error {
                    path: err
                        .path()
                        .map(|p| relative(&absolute, p))
                        .unwrap_or_default(),
                    error: err.to_string(),
                });
            }
        }
    }

    Ok(InventoryReport {
        root: absolute.to_string_lossy().into_owned(),
        files,
    })
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && SKIP_DIRS
            .iter()
            .any(|skip| entry.file_name().to_string_lossy() == *skip)
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn hash_file(path: &Path) -> io::Result<(u64, String)> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let size = io::copy(&mut file, &mut hasher)?;
    Ok((size, hex::encode(hasher.finalize())))
}
