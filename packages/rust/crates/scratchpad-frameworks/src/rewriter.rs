//! Markup-to-structure conversion of framework records.
//!
//! State machine per record:
//!
//! ```text
//! RAW ──(sentinel absent)──▶ RAW            (UnknownFormat, untouched)
//! RAW ──(markup found)─────▶ STRUCTURED     (structure attached)
//! STRUCTURED ──────────────▶ STRUCTURED     (no-op)
//! ```

use std::path::Path;

use scratchpad_markup::{MarkupKind, Section, Structure, detect, extract};
use serde_yaml::{Mapping, Value};

use crate::canonical::to_canonical_yaml;
use crate::error::Result;
use crate::loader::{load, write_text};
use crate::record::{Record, RecordState, keys};

/// Default sentinel that marks a convertible legacy blob.
pub const DEFAULT_SENTINEL: &str = "system_prompt";

/// Conversion settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteConfig {
    /// Tag name whose opening tag must appear in `legacy_content`.
    pub sentinel_tag: String,
    /// Move `content` to `original_content` instead of keeping it in place.
    pub drop_raw_content: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            sentinel_tag: DEFAULT_SENTINEL.to_string(),
            drop_raw_content: true,
        }
    }
}

/// Why a record was left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Document is empty or comment-only.
    Empty,
    /// Top level is not a mapping.
    NotAMapping,
    /// A field the conversion reads is absent or has the wrong type.
    MissingField(&'static str),
    /// `framework.structure` already exists.
    AlreadyStructured,
    /// `content` carries no tags or bracketed markers.
    NoMarkup,
    /// `legacy_content` lacks the sentinel opening tag.
    UnknownFormat {
        /// Sentinel tag that was looked for.
        sentinel: String,
    },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("empty document"),
            Self::NotAMapping => f.write_str("document is not a mapping"),
            Self::MissingField(field) => write!(f, "no '{field}' field"),
            Self::AlreadyStructured => f.write_str("already structured"),
            Self::NoMarkup => f.write_str("content has no markup"),
            Self::UnknownFormat { sentinel } => write!(f, "legacy content without <{sentinel}>"),
        }
    }
}

/// Outcome of a rewrite.
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite {
    /// Nothing to do; the input stays as it is.
    Unchanged(SkipReason),
    /// Record converted.
    Converted {
        /// Updated record.
        record: Value,
        /// Canonical text of `record`.
        text: String,
    },
}

/// Convert the markup of one record into `framework.structure`.
#[must_use]
pub fn rewrite(value: &Value, config: &RewriteConfig) -> Rewrite {
    let Some(view) = Record::new(value) else {
        return Rewrite::Unchanged(SkipReason::NotAMapping);
    };
    let Some(framework) = view.framework() else {
        return Rewrite::Unchanged(SkipReason::MissingField(keys::FRAMEWORK));
    };
    if view.state() == RecordState::Structured {
        return Rewrite::Unchanged(SkipReason::AlreadyStructured);
    }

    let legacy = framework.get(keys::LEGACY_CONTENT).and_then(Value::as_str);
    let converted = if let Some(legacy) = legacy {
        if !has_opening_tag(legacy, &config.sentinel_tag) {
            return Rewrite::Unchanged(SkipReason::UnknownFormat {
                sentinel: config.sentinel_tag.clone(),
            });
        }
        convert_legacy(framework, legacy)
    } else if let Some(content) = framework.get(keys::CONTENT).and_then(Value::as_str) {
        if detect(content) == MarkupKind::Plain {
            return Rewrite::Unchanged(SkipReason::NoMarkup);
        }
        convert_content(framework, content, config.drop_raw_content)
    } else {
        return Rewrite::Unchanged(SkipReason::MissingField(keys::CONTENT));
    };

    let record: Mapping = view
        .mapping()
        .iter()
        .map(|(k, v)| {
            if k.as_str() == Some(keys::FRAMEWORK) {
                (k.clone(), Value::Mapping(converted.clone()))
            } else {
                (k.clone(), v.clone())
            }
        })
        .collect();
    let record = Value::Mapping(record);
    let text = to_canonical_yaml(&record);
    Rewrite::Converted { record, text }
}

/// Load, rewrite and save one file. The file is written only on conversion.
///
/// # Errors
/// Returns load or save failures; skips are `Ok(Rewrite::Unchanged(_))`.
pub fn rewrite_file(path: &Path, config: &RewriteConfig) -> Result<Rewrite> {
    let Some(value) = load(path)? else {
        return Ok(Rewrite::Unchanged(SkipReason::Empty));
    };
    let outcome = rewrite(&value, config);
    if let Rewrite::Converted { text, .. } = &outcome {
        write_text(path, text)?;
    }
    Ok(outcome)
}

/// `structure` goes right before `legacy_content`, which stays for audit.
fn convert_legacy(framework: &Mapping, legacy: &str) -> Mapping {
    let structure = structure_to_value(&extract(legacy));
    let mut out = Mapping::with_capacity(framework.len() + 1);
    for (k, v) in framework {
        if k.as_str() == Some(keys::LEGACY_CONTENT) {
            out.insert(keys::STRUCTURE.into(), structure.clone());
        }
        out.insert(k.clone(), v.clone());
    }
    out
}

/// `structure` takes the position of `content`; the raw text follows it.
fn convert_content(framework: &Mapping, content: &str, drop_raw: bool) -> Mapping {
    let structure = structure_to_value(&extract(content));
    let mut out = Mapping::with_capacity(framework.len() + 1);
    for (k, v) in framework {
        if k.as_str() != Some(keys::CONTENT) {
            out.insert(k.clone(), v.clone());
            continue;
        }
        out.insert(keys::STRUCTURE.into(), structure.clone());
        if drop_raw {
            out.insert(keys::ORIGINAL_CONTENT.into(), v.clone());
        } else {
            out.insert(k.clone(), v.clone());
        }
    }
    out
}

fn has_opening_tag(text: &str, tag: &str) -> bool {
    let needle = format!("<{}>", tag.to_ascii_lowercase());
    text.to_ascii_lowercase().contains(&needle)
}

/// YAML value of an extracted structure.
#[must_use]
pub fn structure_to_value(structure: &Structure) -> Value {
    Value::Mapping(
        structure
            .iter()
            .map(|(key, section)| (Value::String(key.to_string()), section_to_value(section)))
            .collect(),
    )
}

fn section_to_value(section: &Section) -> Value {
    match section {
        Section::Text(text) => Value::String(text.clone()),
        Section::Names(names) => Value::Sequence(names.iter().cloned().map(Value::String).collect()),
        Section::Nested(structure) => structure_to_value(structure),
        Section::Repeated(items) => Value::Sequence(items.iter().map(section_to_value).collect()),
    }
}
