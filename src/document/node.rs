//! Source document representation.
//!
//! This module provides the core data structure the transition engine reads
//! from: a recursive `DataValue` holding maps, lists and scalars. Maps keep
//! their insertion order so that the pre-order walk visits keys in the order
//! they appeared in the original document.
//!
//! # Example
//!
//! ```
//! use datatransit::document::node::{DataValue, DataNumber};
//! use indexmap::IndexMap;
//!
//! let mut account = IndexMap::new();
//! account.insert("id".to_string(), DataValue::Number(DataNumber::Integer(6)));
//! account.insert("displayId".to_string(), DataValue::from("Main"));
//!
//! let root = DataValue::Object(account);
//! assert!(root.is_object());
//! assert_eq!(root.len(), 2);
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Represents numbers (integer or float)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataNumber {
    Integer(i64),
    /// Integers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
}

impl fmt::Display for DataNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataNumber::Integer(i) => write!(f, "{}", i),
            DataNumber::Unsigned(u) => write!(f, "{}", u),
            DataNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl DataNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            DataNumber::Integer(i) => *i as f64,
            DataNumber::Unsigned(u) => *u as f64,
            DataNumber::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, DataNumber::Integer(_) | DataNumber::Unsigned(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, DataNumber::Float(_))
    }
}

/// A value in a source document.
///
/// Objects and arrays contain further `DataValue`s, so a whole parsed JSON or
/// YAML document is a single `DataValue`. The engine only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataValue {
    /// Key-value pairs in insertion order
    Object(IndexMap<String, DataValue>),
    /// Ordered values, keyed by their index
    Array(Vec<DataValue>),
    String(String),
    Number(DataNumber),
    Boolean(bool),
    Null,
}

impl DataValue {
    /// Returns true if this value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, DataValue::Object(_))
    }

    /// Returns true if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, DataValue::Array(_))
    }

    /// Returns true if this value is a container (object or array).
    ///
    /// # Example
    ///
    /// ```
    /// use datatransit::document::node::DataValue;
    /// use indexmap::IndexMap;
    ///
    /// assert!(DataValue::Object(IndexMap::new()).is_container());
    /// assert!(DataValue::Array(vec![]).is_container());
    /// assert!(!DataValue::from(42).is_container());
    /// ```
    pub fn is_container(&self) -> bool {
        matches!(self, DataValue::Object(_) | DataValue::Array(_))
    }

    /// Returns true for strings, numbers and booleans.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            DataValue::String(_) | DataValue::Number(_) | DataValue::Boolean(_)
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Number of direct children. Scalars have none.
    pub fn len(&self) -> usize {
        match self {
            DataValue::Object(entries) => entries.len(),
            DataValue::Array(items) => items.len(),
            _ => 0,
        }
    }

    /// Returns true if this value has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DataValue::Number(DataNumber::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    /// Looks up a direct child of an object by key.
    pub fn get(&self, key: &str) -> Option<&DataValue> {
        match self {
            DataValue::Object(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Short, human readable name of the value's type, used in messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Object(_) => "object",
            DataValue::Array(_) => "array",
            DataValue::String(_) => "string",
            DataValue::Number(DataNumber::Integer(_) | DataNumber::Unsigned(_)) => "integer",
            DataValue::Number(DataNumber::Float(_)) => "float",
            DataValue::Boolean(_) => "boolean",
            DataValue::Null => "null",
        }
    }
}

impl fmt::Display for DataValue {
    /// Scalars print as their plain text; containers print as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::String(s) => write!(f, "{}", s),
            DataValue::Number(n) => write!(f, "{}", n),
            DataValue::Boolean(b) => write!(f, "{}", b),
            DataValue::Null => write!(f, "null"),
            DataValue::Object(_) | DataValue::Array(_) => {
                let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                write!(f, "{}", text)
            }
        }
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::String(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::String(value)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Number(DataNumber::Integer(value))
    }
}

impl From<u64> for DataValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => DataValue::Number(DataNumber::Integer(i)),
            Err(_) => DataValue::Number(DataNumber::Unsigned(value)),
        }
    }
}

impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        DataValue::Number(DataNumber::Integer(i64::from(value)))
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Number(DataNumber::Float(value))
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Boolean(value)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DataValue::Null, Into::into)
    }
}

impl From<Vec<DataValue>> for DataValue {
    fn from(items: Vec<DataValue>) -> Self {
        DataValue::Array(items)
    }
}

impl From<IndexMap<String, DataValue>> for DataValue {
    fn from(entries: IndexMap<String, DataValue>) -> Self {
        DataValue::Object(entries)
    }
}
