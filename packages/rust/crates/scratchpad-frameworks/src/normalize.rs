//! Canonical-form normalization and document-marker fixing.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::canonical::{DOCUMENT_START, to_canonical_yaml};
use crate::error::{FrameworkError, Result};
use crate::loader::{parse_record, read_text, write_text};
use crate::record::keys;

const NBSP: char = '\u{a0}';

/// Keys whose values are raw prompt text.
const TEXT_KEYS: [&str; 3] = [keys::CONTENT, keys::LEGACY_CONTENT, keys::ORIGINAL_CONTENT];

/// Outcome of normalizing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalized {
    /// File rewritten in canonical form.
    Rewritten,
    /// File was already canonical.
    Unchanged,
    /// Empty or comment-only document.
    Empty,
}

/// Normalize an in-memory document; `Ok(None)` for empty documents.
///
/// Non-breaking spaces become plain spaces, escaped `\n`/`\t` sequences in
/// single-line prompt text are unescaped, and the record is re-emitted
/// canonically.
///
/// # Errors
/// Returns the parser error for malformed YAML.
pub fn normalize_text(text: &str) -> std::result::Result<Option<String>, serde_yaml::Error> {
    let cleaned = text.replace(NBSP, " ");
    let Some(mut value) = parse_record(&cleaned)? else {
        return Ok(None);
    };
    if let Some(framework) = value
        .as_mapping_mut()
        .and_then(|root| root.get_mut(keys::FRAMEWORK))
        .and_then(Value::as_mapping_mut)
    {
        unescape_text_keys(framework);
    }
    Ok(Some(to_canonical_yaml(&value)))
}

/// Normalize the file at `path`, writing only when the bytes change.
///
/// # Errors
/// Read, parse and write failures; a parse failure leaves the file untouched.
pub fn normalize_file(path: &Path, max_bytes: u64) -> Result<Normalized> {
    let text = read_text(path, max_bytes)?;
    let Some(canonical) = normalize_text(&text).map_err(|err| FrameworkError::parse(path, &err))?
    else {
        return Ok(Normalized::Empty);
    };
    if canonical == text {
        return Ok(Normalized::Unchanged);
    }
    write_text(path, &canonical)?;
    Ok(Normalized::Rewritten)
}

fn unescape_text_keys(framework: &mut Mapping) {
    for key in TEXT_KEYS {
        if let Some(Value::String(text)) = framework.get_mut(key) {
            if !text.contains('\n') && (text.contains("\\n") || text.contains("\\t")) {
                *text = unescape(text);
            }
        }
    }
}

/// Resolve `\n`, `\t`, `\"` and `\\`; other backslashes stay as written.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            _ => {
                out.push('\\');
                continue;
            }
        }
        chars.next();
    }
    out
}

/// Text with a leading `---` marker; `None` when one is already present.
#[must_use]
pub fn ensure_document_marker(text: &str) -> Option<String> {
    if text.trim_start().starts_with("---") {
        return None;
    }
    Some(format!("{DOCUMENT_START}{text}"))
}

/// Add a missing document marker to the file at `path`.
///
/// Returns whether the file was modified.
///
/// # Errors
/// Read and write failures.
pub fn add_marker_file(path: &Path, max_bytes: u64) -> Result<bool> {
    let text = read_text(path, max_bytes)?;
    match ensure_document_marker(&text) {
        Some(marked) => {
            write_text(path, &marked)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_added_once() {
        let marked = ensure_document_marker("name: x\n").unwrap();
        assert_eq!(marked, "---\nname: x\n");
        assert_eq!(ensure_document_marker(&marked), None);
        assert_eq!(ensure_document_marker("\n\n---\nname: x\n"), None);
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"a\nb\tc"), "a\nb\tc");
        assert_eq!(unescape(r#"say \"hi\" \\ done"#), "say \"hi\" \\ done");
        assert_eq!(unescape(r"C:\path\x"), r"C:\path\x");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_normalize_unescapes_single_line_content() {
        let text = "framework:\n  content: 'Step 1\\nStep 2\\n'\n";
        let out = normalize_text(text).unwrap().unwrap();
        assert_eq!(out, "---\nframework:\n  content: |\n    Step 1\n    Step 2\n");
    }

    #[test]
    fn test_normalize_replaces_nbsp() {
        let out = normalize_text("name: a\u{a0}b\n").unwrap().unwrap();
        assert_eq!(out, "---\nname: a b\n");
    }

    #[test]
    fn test_canonical_text_is_fixed_point() {
        let text = "name: x\nversion: 1.0\n";
        let once = normalize_text(text).unwrap().unwrap();
        assert_eq!(normalize_text(&once).unwrap().unwrap(), once);
    }
}
