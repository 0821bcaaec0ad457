//! Atomic writes.
//!
//! A reader never observes a partially written framework file: data goes to a
//! `NamedTempFile` in the destination directory (same filesystem), is flushed
//! and fsynced, then renamed over the target.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::IoError;

/// Write `data` to `path` with temp-file + fsync + rename.
///
/// The parent directory must already exist.
///
/// # Errors
/// Returns `IoError::NoParent` for root-like paths, `IoError::Persist` when
/// the final rename fails and `IoError::System` for any other filesystem
/// failure. On error the previous file content is untouched.
pub fn write_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<(), IoError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => return Err(IoError::NoParent(path.to_path_buf())),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| IoError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    sync_directory(parent);
    debug!(path = %path.display(), bytes = data.len(), "atomic write committed");
    Ok(())
}

#[cfg(unix)]
fn sync_directory(dir: &Path) {
    // Best effort: the rename itself already happened.
    if let Ok(handle) = std::fs::File::open(dir) {
        let _ = handle.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_directory(_dir: &Path) {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("f.yml");
        std::fs::write(&p, "old").unwrap();
        write_atomic(&p, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&p).unwrap(), "new");
    }

    #[test]
    fn test_write_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("f.yml");
        write_atomic(&p, b"---\n").unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
