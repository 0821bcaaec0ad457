//! Tag-pair scanning.
//!
//! `<name>inner</name>` where the name starts with a word character and may
//! carry spaces or hyphens (`<scratchpad flow>`). The close tag is the first
//! one after the opening tag with the same name, compared ASCII
//! case-insensitively. An opening tag without a close is skipped and scanning
//! resumes just after its `<`.

use std::sync::LazyLock;

use regex::Regex;

use crate::compile_regex;

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"<(\w[\w\s-]*)>"));
static NAME_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"[\s-]+"));

/// One matched tag region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPair<'a> {
    /// Tag name exactly as written in the opening tag.
    pub name: &'a str,
    /// Text between the opening and closing tag.
    pub inner: &'a str,
    /// Byte offset of the opening `<`.
    pub start: usize,
    /// Byte offset just past the closing `>`.
    pub end: usize,
}

/// Find every top-level tag pair in document order.
///
/// Matches never overlap: scanning continues after each matched close tag, so
/// tags nested inside a match are left for the recursive pass.
#[must_use]
pub fn find_tag_pairs(text: &str) -> Vec<TagPair<'_>> {
    let lowered = text.to_ascii_lowercase();
    let mut pairs = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let Some(caps) = OPEN_TAG.captures_at(text, pos) else {
            break;
        };
        let (Some(open), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };

        let close = format!("</{}>", name.as_str().to_ascii_lowercase());
        match lowered[open.end()..].find(&close) {
            Some(offset) => {
                let inner_end = open.end() + offset;
                let end = inner_end + close.len();
                pairs.push(TagPair {
                    name: name.as_str(),
                    inner: &text[open.end()..inner_end],
                    start: open.start(),
                    end,
                });
                pos = end;
            }
            // `<` is one byte, so start + 1 is a char boundary.
            None => pos = open.start() + 1,
        }
    }

    pairs
}

/// Text with every matched region removed, in order.
#[must_use]
pub fn strip_tag_pairs(text: &str, pairs: &[TagPair<'_>]) -> String {
    let mut leftover = String::with_capacity(text.len());
    let mut cursor = 0;
    for pair in pairs {
        leftover.push_str(&text[cursor..pair.start]);
        cursor = pair.end;
    }
    leftover.push_str(&text[cursor..]);
    leftover
}

/// Canonical mapping key for a tag name.
///
/// Lowercased, trimmed, and every run of whitespace or hyphens collapsed
/// into a single `_`.
#[must_use]
pub fn normalize_tag_name(name: &str) -> String {
    NAME_SEPARATORS
        .replace_all(name.trim(), "_")
        .to_lowercase()
}
