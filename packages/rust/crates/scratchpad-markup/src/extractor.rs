//! Recursive markup extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::brackets::{find_fenced_template, section_labels};
use crate::clean::clean_text;
use crate::section::{Section, Structure};
use crate::tags::{find_tag_pairs, normalize_tag_name, strip_tag_pairs};
use crate::{
    BRACKETED_FORMAT, CONTENT_KEY, INSTRUCTIONS_KEY, RAW_FORMAT_KEY, SECTIONS_KEY, UNTAGGED_KEY,
    compile_regex,
};

static SEPARATOR_LINE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"(?m)^[ \t]*-{3,}[ \t]*$"));

/// Which markup convention a text uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupKind {
    /// At least one balanced `<name>...</name>` pair.
    Tags,
    /// No tag pairs but at least one `[Label: ...]` marker.
    Bracketed,
    /// Neither.
    Plain,
}

/// Classify `text` by its dominant markup convention.
#[must_use]
pub fn detect(text: &str) -> MarkupKind {
    if !find_tag_pairs(text).is_empty() {
        MarkupKind::Tags
    } else if !section_labels(text).is_empty() {
        MarkupKind::Bracketed
    } else {
        MarkupKind::Plain
    }
}

/// Extract the nested structure of a content blob.
///
/// Tag pairs become keys (normalized), bracketed markers become a section
/// list, anything else comes back cleaned under `content`.
#[must_use]
pub fn extract(text: &str) -> Structure {
    let pairs = find_tag_pairs(text);
    if !pairs.is_empty() {
        let mut structure = Structure::new();
        for pair in &pairs {
            structure.insert(normalize_tag_name(pair.name), section_for(pair.inner));
        }

        let leftover = strip_tag_pairs(text, &pairs);
        let leftover = clean_text(&SEPARATOR_LINE.replace_all(&leftover, ""));
        if !leftover.is_empty() {
            let key = if structure.get(INSTRUCTIONS_KEY).is_some() {
                UNTAGGED_KEY
            } else {
                INSTRUCTIONS_KEY
            };
            structure.insert(key, leftover);
        }
        return structure;
    }

    let labels = section_labels(text);
    let mut structure = Structure::new();
    if labels.is_empty() {
        structure.insert(CONTENT_KEY, clean_text(text));
        return structure;
    }

    structure.insert(SECTIONS_KEY, labels);
    structure.insert(RAW_FORMAT_KEY, clean_text(text));
    if let Some(fenced) = find_fenced_template(text) {
        if let Some(usage) = fenced.usage {
            structure.insert("usage", usage);
        }
        structure.insert("template", fenced.template);
    }
    structure
}

fn section_for(inner: &str) -> Section {
    if !find_tag_pairs(inner).is_empty() {
        return Section::Nested(extract(inner));
    }

    let labels = section_labels(inner);
    if labels.is_empty() {
        return Section::Text(clean_text(inner));
    }

    let mut bracketed = Structure::new();
    bracketed.insert("format", BRACKETED_FORMAT);
    bracketed.insert(SECTIONS_KEY, labels);
    match find_fenced_template(inner) {
        Some(fenced) => {
            if let Some(usage) = fenced.usage {
                bracketed.insert("usage", usage);
            }
            bracketed.insert("template", fenced.template);
        }
        None => bracketed.insert("template", clean_text(inner)),
    }
    Section::Nested(bracketed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(detect("<a>x</a>"), MarkupKind::Tags);
        assert_eq!(detect("[A: x]"), MarkupKind::Bracketed);
        assert_eq!(detect("just words"), MarkupKind::Plain);
        assert_eq!(detect("<a>never closed"), MarkupKind::Plain);
    }

    #[test]
    fn test_separator_lines_dropped_from_leftover() {
        let s = extract("<a>x</a>\n---\nTrailing note\n-----\n");
        assert_eq!(s.get(INSTRUCTIONS_KEY), Some(&Section::from("Trailing note")));
    }

    #[test]
    fn test_whitespace_leftover_omitted() {
        let s = extract("  <a>x</a>\n\n<b>y</b>  \n");
        assert_eq!(s.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_tag_with_bracketed_inner_no_fence() {
        let s = extract("<format>[Goal: aim] [Steps: list]</format>");
        let nested = s.get("format").and_then(Section::as_nested).unwrap();
        assert_eq!(nested.get("format"), Some(&Section::from(BRACKETED_FORMAT)));
        assert_eq!(
            nested.get(SECTIONS_KEY),
            Some(&Section::Names(vec!["Goal".into(), "Steps".into()]))
        );
        assert_eq!(nested.get("usage"), None);
        assert_eq!(
            nested.get("template"),
            Some(&Section::from("[Goal: aim] [Steps: list]"))
        );
    }
}
