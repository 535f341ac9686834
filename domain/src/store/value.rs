//! Stored value and lookup result value objects

use serde::{Deserialize, Serialize};

/// A value held by an option entry.
///
/// `Confidential` is a present key with no value. It is a standing
/// instruction to always ask the user and never store the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum StoredValue {
    /// A concrete string value
    Value(String),
    /// Explicitly set but deliberately value-less
    Confidential,
}

impl StoredValue {
    /// Create a concrete value
    pub fn value(value: impl Into<String>) -> Self {
        StoredValue::Value(value.into())
    }

    /// The concrete value, if any
    pub fn as_value(&self) -> Option<&str> {
        match self {
            StoredValue::Value(v) => Some(v),
            StoredValue::Confidential => None,
        }
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::Value(value.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        StoredValue::Value(value)
    }
}

/// Result of reading a single (section, option) pair from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The option holds a concrete value
    Found(String),
    /// The section or the option does not exist
    MissingAbsent,
    /// The option exists but carries the confidential sentinel
    MissingConfidential,
}

impl Lookup {
    /// Whether the read failed to produce a value
    pub fn is_miss(&self) -> bool {
        !matches!(self, Lookup::Found(_))
    }
}

impl From<Option<&StoredValue>> for Lookup {
    fn from(entry: Option<&StoredValue>) -> Self {
        match entry {
            Some(StoredValue::Value(v)) => Lookup::Found(v.clone()),
            Some(StoredValue::Confidential) => Lookup::MissingConfidential,
            None => Lookup::MissingAbsent,
        }
    }
}
