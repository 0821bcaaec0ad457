//! Parsed structure model.

use serde::{Serialize, Serializer};

/// One node of an extracted structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Section {
    /// Cleaned leaf text.
    Text(String),
    /// Labels from bracketed section markers.
    Names(Vec<String>),
    /// Recursively extracted markup.
    Nested(Structure),
    /// Same-key siblings, in document order.
    Repeated(Vec<Section>),
}

impl Section {
    /// Leaf text, if this is a leaf.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Nested structure, if this is one.
    #[must_use]
    pub fn as_nested(&self) -> Option<&Structure> {
        match self {
            Self::Nested(structure) => Some(structure),
            _ => None,
        }
    }
}

impl From<&str> for Section {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Section {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Insertion-ordered `key -> Section` mapping.
///
/// Inserting an existing key never overwrites: the entry keeps its position
/// and becomes a [`Section::Repeated`] list of every value seen for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Structure {
    entries: Vec<(String, Section)>,
}

impl Structure {
    /// Empty structure.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` under `key`, collecting repeats into a list.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Section>) {
        let key = key.into();
        let value = value.into();
        let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == key) else {
            self.entries.push((key, value));
            return;
        };
        match existing {
            Section::Repeated(items) => items.push(value),
            other => {
                let first = std::mem::replace(other, Section::Repeated(Vec::new()));
                *other = Section::Repeated(vec![first, value]);
            }
        }
    }

    /// Value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Section> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Structure> for Section {
    fn from(structure: Structure) -> Self {
        Self::Nested(structure)
    }
}

impl From<Vec<String>> for Section {
    fn from(names: Vec<String>) -> Self {
        Self::Names(names)
    }
}

impl Serialize for Structure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}
