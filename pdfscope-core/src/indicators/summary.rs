//! Summary and finding types produced by the indicator parser

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Well-known summary key for the document header line
pub const HEADER_KEY: &str = "header";
/// Well-known summary key for the total entropy line
pub const ENTROPY_KEY: &str = "entropy";

/// A single summary value: either an object count or free text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryValue {
    Count(u64),
    Text(String),
}

impl SummaryValue {
    pub fn as_count(&self) -> Option<u64> {
        match self {
            SummaryValue::Count(n) => Some(*n),
            SummaryValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SummaryValue::Text(s) => Some(s),
            SummaryValue::Count(_) => None,
        }
    }
}

impl fmt::Display for SummaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryValue::Count(n) => write!(f, "{n}"),
            SummaryValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for SummaryValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SummaryValue::Count(n) => serializer.serialize_u64(*n),
            SummaryValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Open-ended mapping from indicator category to value.
///
/// Keys keep the order in which they were first seen. Inserting an existing
/// key replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Summary {
    entries: IndexMap<String, SummaryValue>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: SummaryValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&SummaryValue> {
        self.entries.get(key)
    }

    pub fn header(&self) -> Option<&str> {
        self.get(HEADER_KEY).and_then(SummaryValue::as_text)
    }

    pub fn entropy(&self) -> Option<&str> {
        self.get(ENTROPY_KEY).and_then(SummaryValue::as_text)
    }

    /// Object count for a category; `name` is matched case-insensitively.
    pub fn count(&self, name: &str) -> Option<u64> {
        self.get(&name.to_lowercase())
            .and_then(SummaryValue::as_count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SummaryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One line of raw scan output flagged as indicator evidence, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Finding(String);

impl Finding {
    pub(crate) fn new(line: &str) -> Self {
        Finding(line.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Finding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
