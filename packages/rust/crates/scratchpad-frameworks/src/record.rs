//! Framework record model.
//!
//! A record is a YAML mapping kept in authored key order. Accessors read the
//! well-known fields without imposing a schema: anything else in the mapping
//! is carried through untouched.

use serde_yaml::{Mapping, Value};

/// Well-known record keys.
pub mod keys {
    /// Display name.
    pub const NAME: &str = "name";
    /// Version string.
    pub const VERSION: &str = "version";
    /// Category label.
    pub const CATEGORY: &str = "category";
    /// Documentation mapping.
    pub const DOCUMENTATION: &str = "documentation";
    /// `documentation.purpose`.
    pub const PURPOSE: &str = "purpose";
    /// `documentation.use_case`.
    pub const USE_CASE: &str = "use_case";
    /// `documentation.character_count`.
    pub const CHARACTER_COUNT: &str = "character_count";
    /// Framework body mapping.
    pub const FRAMEWORK: &str = "framework";
    /// Raw markup blob.
    pub const CONTENT: &str = "content";
    /// Raw blob in the older wrapper format.
    pub const LEGACY_CONTENT: &str = "legacy_content";
    /// Raw blob kept after conversion.
    pub const ORIGINAL_CONTENT: &str = "original_content";
    /// Parsed structure.
    pub const STRUCTURE: &str = "structure";
}

/// Keys a complete record must carry at top level.
pub const REQUIRED_KEYS: [&str; 4] = [
    keys::NAME,
    keys::CATEGORY,
    keys::DOCUMENTATION,
    keys::FRAMEWORK,
];

/// Conversion state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Content is still a raw markup blob.
    Raw,
    /// `framework.structure` is present.
    Structured,
}

/// Borrowed view over a record mapping.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    map: &'a Mapping,
}

impl<'a> Record<'a> {
    /// View `value` as a record; `None` unless it is a mapping.
    #[must_use]
    pub fn new(value: &'a Value) -> Option<Self> {
        value.as_mapping().map(|map| Self { map })
    }

    /// Underlying mapping.
    #[must_use]
    pub fn mapping(&self) -> &'a Mapping {
        self.map
    }

    /// `name`, when it is a string.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.map.get(keys::NAME).and_then(Value::as_str)
    }

    /// `version` rendered as text, whether stored as a string or a number.
    #[must_use]
    pub fn version(&self) -> Option<String> {
        self.map.get(keys::VERSION).and_then(scalar_text)
    }

    /// `category`, when it is a string.
    #[must_use]
    pub fn category(&self) -> Option<&'a str> {
        self.map.get(keys::CATEGORY).and_then(Value::as_str)
    }

    /// `documentation` mapping.
    #[must_use]
    pub fn documentation(&self) -> Option<&'a Mapping> {
        self.map.get(keys::DOCUMENTATION).and_then(Value::as_mapping)
    }

    /// `documentation.<key>` rendered as text.
    #[must_use]
    pub fn doc_field(&self, key: &str) -> Option<String> {
        self.documentation()
            .and_then(|doc| doc.get(key))
            .and_then(scalar_text)
    }

    /// `framework` mapping.
    #[must_use]
    pub fn framework(&self) -> Option<&'a Mapping> {
        self.map.get(keys::FRAMEWORK).and_then(Value::as_mapping)
    }

    /// Conversion state; a record without a framework mapping counts as raw.
    #[must_use]
    pub fn state(&self) -> RecordState {
        match self.framework() {
            Some(fw) if fw.contains_key(keys::STRUCTURE) => RecordState::Structured,
            _ => RecordState::Raw,
        }
    }

    /// Required top-level keys that are absent.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_KEYS
            .into_iter()
            .filter(|key| !self.map.contains_key(*key))
            .collect()
    }
}

/// Text of a scalar value; `None` for null, empty strings and collections.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

/// True for null, empty strings and missing values.
#[must_use]
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_accessors() {
        let value = parse(
            "name: Scratchpad 2.7\nversion: 2.7\ncategory: core\ndocumentation:\n  purpose: Think\n  character_count: 1200\nframework:\n  content: x\n",
        );
        let record = Record::new(&value).unwrap();
        assert_eq!(record.name(), Some("Scratchpad 2.7"));
        assert_eq!(record.version().as_deref(), Some("2.7"));
        assert_eq!(record.doc_field(keys::PURPOSE).as_deref(), Some("Think"));
        assert_eq!(record.doc_field(keys::CHARACTER_COUNT).as_deref(), Some("1200"));
        assert_eq!(record.state(), RecordState::Raw);
        assert!(record.missing_required().is_empty());
    }

    #[test]
    fn test_structured_state() {
        let value = parse("framework:\n  structure:\n    role: x\n");
        assert_eq!(Record::new(&value).unwrap().state(), RecordState::Structured);
    }

    #[test]
    fn test_missing_required_in_order() {
        let value = parse("name: x\nframework: {}\n");
        let record = Record::new(&value).unwrap();
        assert_eq!(record.missing_required(), vec!["category", "documentation"]);
    }

    #[test]
    fn test_non_mapping_is_not_a_record() {
        assert!(Record::new(&parse("- a\n- b\n")).is_none());
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some(&Value::Null)));
        assert!(is_blank(Some(&Value::String("  ".into()))));
        assert!(!is_blank(Some(&Value::String("1.0".into()))));
    }
}
