// crates/feed-parser/src/value.rs
//! Normalized output values

use crate::xml::Node;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Rendering of [`Value::InvalidDate`]
pub const INVALID_DATE: &str = "Invalid Date";

/// A field value, either cleaned or passed through raw
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Plain text
    Text(String),
    /// Whole number (durations, dimensions, ttl)
    Integer(i64),
    /// Yes/no flags
    Bool(bool),
    /// A number that failed to parse
    NotANumber,
    /// A date that failed to parse
    InvalidDate,
    /// Ordered list of values
    List(Vec<Value>),
    /// Structured value (owner, enclosure, image, link)
    Record(Record),
    /// Untouched element, kept for uncleaned fields
    Raw(Node),
}

impl Value {
    /// Returns the text if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the number if this is an integer value
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the flag if this is a boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the items if this is a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the record if this is a structured value
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the element if this is a raw value
    pub fn as_raw(&self) -> Option<&Node> {
        match self {
            Value::Raw(node) => Some(node),
            _ => None,
        }
    }

    /// Returns true for values that carry nothing: empty text, not-a-number,
    /// and structures without members
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Text(text) => text.is_empty(),
            Value::NotANumber => true,
            Value::List(items) => items.is_empty(),
            Value::Record(record) => record.is_empty(),
            Value::Integer(_) | Value::Bool(_) | Value::InvalidDate | Value::Raw(_) => false,
        }
    }

    /// Drops empty members one level down, then the value itself if nothing is left
    pub fn strip_empty(self) -> Option<Value> {
        let value = match self {
            Value::List(items) => Value::List(items.into_iter().filter(|v| !v.is_empty()).collect()),
            Value::Record(record) => Value::Record(record.without_empty()),
            other => other,
        };

        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(text) => serializer.serialize_str(text),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::NotANumber => serializer.serialize_none(),
            Value::InvalidDate => serializer.serialize_str(INVALID_DATE),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(record) => record.serialize(serializer),
            Value::Raw(node) => node.serialize(serializer),
        }
    }
}

/// Insertion-ordered mapping of names to values
///
/// Used both for meta/episode objects (keys follow the configured field
/// order) and for structured sub-values like owner or enclosure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing an existing value in place
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Sets `key` only when a value is present
    pub fn insert_some(&mut self, key: impl Into<String>, value: Option<Value>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Looks up a value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns true if `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the record has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Removes entries whose value is empty
    pub fn without_empty(self) -> Self {
        Self {
            entries: self.entries.into_iter().filter(|(_, v)| !v.is_empty()).collect(),
        }
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
