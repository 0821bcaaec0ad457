//! Binary detection and decoding utilities.

use memchr::memchr;

use crate::error::IoError;

const SNIFF_LEN: usize = 8192;

/// Quick binary detection - checks the first 8KB for NULL bytes.
#[must_use]
pub fn is_binary(buffer: &[u8]) -> bool {
    let check_len = std::cmp::min(buffer.len(), SNIFF_LEN);
    memchr(0, &buffer[..check_len]).is_some()
}

/// Decode bytes to a `String`. Invalid UTF-8 is rejected, never replaced,
/// so text read here can be written back without changing a byte.
///
/// A leading UTF-8 byte order mark is dropped so YAML parsers see the
/// document start marker on the first column.
///
/// # Errors
/// Returns `IoError::BinaryFile` when binary content is detected and
/// `IoError::Encoding` for invalid UTF-8.
pub fn decode_buffer(buffer: Vec<u8>) -> Result<String, IoError> {
    if is_binary(&buffer) {
        return Err(IoError::BinaryFile);
    }

    let text = String::from_utf8(buffer)
        .map_err(|e| IoError::Encoding(e.utf8_error().valid_up_to()))?;

    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_byte_is_binary() {
        assert!(is_binary(b"name: x\x00"));
        assert!(!is_binary(b"name: x\n"));
    }

    #[test]
    fn test_decode_strips_bom() {
        let decoded = decode_buffer(b"\xef\xbb\xbf---\nname: a\n".to_vec()).unwrap();
        assert!(decoded.starts_with("---"));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert!(matches!(
            decode_buffer(b"name: caf\xe9\n".to_vec()),
            Err(IoError::Encoding(9))
        ));
    }
}
