//! Result types produced by extraction.

use super::literal::Literal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One declared attribute of the configuration block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeEntry {
    #[serde(skip)]
    pub name: String,
    pub value: Literal,
    pub description: String,
    /// 1-based line of the assignment in the fragment
    #[serde(skip)]
    pub line: usize,
}

/// Ordered mapping from attribute name to its entry.
///
/// Iteration follows first-assignment order. Re-inserting a name replaces
/// the entry but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigMap {
    entries: Vec<AttributeEntry>,
}

impl ConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, returning the replaced one.
    pub fn insert(&mut self, entry: AttributeEntry) -> Option<AttributeEntry> {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(slot) => Some(std::mem::replace(slot, entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttributeEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

impl<'a> IntoIterator for &'a ConfigMap {
    type Item = &'a AttributeEntry;
    type IntoIter = std::slice::Iter<'a, AttributeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for ConfigMap {
    type Item = AttributeEntry;
    type IntoIter = std::vec::IntoIter<AttributeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Serializes as `{name: {value, description}, ...}` in declaration order.
impl Serialize for ConfigMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, entry)?;
        }
        map.end()
    }
}
