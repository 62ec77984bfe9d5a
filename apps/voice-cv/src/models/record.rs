//! Profile record — field name → value mapping collected over voice.
//!
//! A value is either a scalar string or an ordered list of entries. The literal
//! `"Not provided"` stands for an unset scalar; an empty list stands for no entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Placeholder for an unset scalar field.
pub const NOT_PROVIDED: &str = "Not provided";

/// Value written when the user skips a question.
pub const SKIPPED_BY_USER: &str = "Skipped by user";

// ────────────────────────────────────────────────────────────────────────────
// Entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    pub duration: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
}

/// A single element of a list-valued field.
///
/// Untagged: the JSON shape decides the variant. `Item` covers plain string
/// lists such as skills and interests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Experience(ExperienceEntry),
    Project(ProjectEntry),
    Item(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Field values
// ────────────────────────────────────────────────────────────────────────────

/// Loading is lenient: hand-edited snapshots may hold `null`, booleans or
/// numbers, which are read as the sentinel or as their text form. Writing
/// always produces a string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, from = "StoredValue")]
pub enum FieldValue {
    Text(String),
    List(Vec<Entry>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredValue {
    Text(String),
    List(Vec<Entry>),
    Flag(bool),
    Number(serde_json::Number),
    Null,
}

impl From<StoredValue> for FieldValue {
    fn from(value: StoredValue) -> Self {
        match value {
            StoredValue::Text(text) => FieldValue::Text(text),
            StoredValue::List(entries) => FieldValue::List(entries),
            StoredValue::Flag(true) => FieldValue::Text("Yes".to_string()),
            StoredValue::Flag(false) => FieldValue::Text("No".to_string()),
            StoredValue::Number(number) => FieldValue::Text(number.to_string()),
            StoredValue::Null => FieldValue::Text(NOT_PROVIDED.to_string()),
        }
    }
}

impl FieldValue {
    /// True for blank text, the "Not provided" sentinel, and empty lists.
    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Text(text) => {
                let text = text.trim();
                text.is_empty() || text.eq_ignore_ascii_case(NOT_PROVIDED)
            }
            FieldValue::List(entries) => entries.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::List(_) => None,
        }
    }

    #[cfg(test)]
    pub fn as_entries(&self) -> Option<&[Entry]> {
        match self {
            FieldValue::List(entries) => Some(entries),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Record
// ────────────────────────────────────────────────────────────────────────────

/// The in-progress or frozen profile. Serializes as a flat JSON object with
/// alphabetically ordered keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Scalar value of a field, if the field holds text.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(FieldValue::as_text)
    }

    /// Absent fields count as missing.
    pub fn is_missing(&self, field: &str) -> bool {
        self.fields.get(field).map_or(true, FieldValue::is_missing)
    }

    /// Text of a field that is present and not missing.
    pub fn provided_text(&self, field: &str) -> Option<&str> {
        self.text(field).filter(|_| !self.is_missing(field))
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut FieldValue> {
        self.fields.get_mut(field)
    }

    /// Number of fields holding a real value.
    pub fn provided_count(&self) -> usize {
        self.fields.values().filter(|v| !v.is_missing()).count()
    }
}

impl From<Vec<Entry>> for FieldValue {
    fn from(entries: Vec<Entry>) -> Self {
        FieldValue::List(entries)
    }
}
