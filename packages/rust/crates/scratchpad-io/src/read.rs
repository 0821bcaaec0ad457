//! Bounded synchronous reads.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::detect::decode_buffer;
use crate::error::IoError;

/// Read text from a file with size and binary checks.
///
/// # Arguments
/// * `path` - Path to the file
/// * `max_bytes` - Maximum file size in bytes
///
/// # Errors
/// `NotFound` when the path cannot be stat'ed, `TooLarge` past the limit,
/// `BinaryFile` for NUL-bearing content, `Encoding` for invalid UTF-8,
/// `System` for other failures.
pub fn read_text_safe<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<String, IoError> {
    let path = path.as_ref();

    let metadata =
        fs::metadata(path).map_err(|_| IoError::NotFound(path.to_string_lossy().to_string()))?;

    if metadata.len() > max_bytes {
        return Err(IoError::TooLarge(metadata.len(), max_bytes));
    }

    let mut file = fs::File::open(path)?;
    let mut buffer = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or_default());
    file.read_to_end(&mut buffer)?;

    decode_buffer(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_small_file() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("a.yml");
        fs::write(&p, "---\nname: A\n").unwrap();
        assert_eq!(read_text_safe(&p, 1024).unwrap(), "---\nname: A\n");
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_text_safe("/nonexistent/framework.yml", 1024);
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }
}
