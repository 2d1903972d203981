//! The extracted values of a transition run, keyed by output name.
//!
//! A `ResultSet` is built once from the matched tokens. Afterwards its key set
//! can shrink (`unset`) but never grow: `set` only overwrites keys that are
//! already present, and reading a missing key is always an error rather than a
//! default value.

use std::ops::Index;

use indexmap::map::{IntoIter, IntoValues, Iter, Keys, Values};
use indexmap::IndexMap;
use serde::Serialize;

use super::error::AccessError;
use crate::document::DataValue;

/// Insertion-ordered mapping from output name to extracted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    entries: IndexMap<String, DataValue>,
}

impl ResultSet {
    pub(crate) fn new(entries: IndexMap<String, DataValue>) -> Self {
        Self { entries }
    }

    /// Number of extracted values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Result<&DataValue, AccessError> {
        self.entries
            .get(key)
            .ok_or_else(|| AccessError::NotFound(key.to_string()))
    }

    /// Replaces the value of an existing key, returning the old value.
    ///
    /// Keys that are not part of the result set are rejected; the position of
    /// the key is unchanged.
    pub fn set(&mut self, key: &str, value: DataValue) -> Result<DataValue, AccessError> {
        match self.entries.get_mut(key) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(AccessError::OutOfRange(key.to_string())),
        }
    }

    /// Removes a key, keeping the order of the others. Missing keys are ignored.
    pub fn unset(&mut self, key: &str) -> Option<DataValue> {
        self.entries.shift_remove(key)
    }

    /// Output names in insertion order.
    pub fn keys(&self) -> Keys<'_, String, DataValue> {
        self.entries.keys()
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> Iter<'_, String, DataValue> {
        self.entries.iter()
    }

    pub fn values(&self) -> Values<'_, String, DataValue> {
        self.entries.values()
    }

    /// Consumes the result set, yielding each value once in insertion order.
    pub fn into_values(self) -> IntoValues<String, DataValue> {
        self.entries.into_values()
    }
}

impl Index<&str> for ResultSet {
    type Output = DataValue;

    /// Named access to an extracted value.
    ///
    /// # Panics
    ///
    /// Panics if no value was extracted under `key`; use [`ResultSet::get`]
    /// for a fallible lookup.
    fn index(&self, key: &str) -> &DataValue {
        match self.get(key) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = (&'a String, &'a DataValue);
    type IntoIter = Iter<'a, String, DataValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = (String, DataValue);
    type IntoIter = IntoIter<String, DataValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        let mut entries = IndexMap::new();
        entries.insert("id".to_string(), DataValue::from(6));
        entries.insert("displayName".to_string(), DataValue::from("Foo"));
        ResultSet::new(entries)
    }

    #[test]
    fn test_get_and_contains() {
        let results = sample();
        assert_eq!(results.len(), 2);
        assert!(results.contains_key("id"));
        assert_eq!(results.get("id"), Ok(&DataValue::from(6)));
        assert_eq!(
            results.get("extra"),
            Err(AccessError::NotFound("extra".to_string()))
        );
    }

    #[test]
    fn test_repeated_reads_are_stable() {
        let results = sample();
        assert_eq!(results.get("displayName"), results.get("displayName"));
        assert_eq!(results["displayName"], DataValue::from("Foo"));
        assert_eq!(&results["displayName"], results.get("displayName").unwrap());
    }

    #[test]
    fn test_set_existing_overwrites_in_place() {
        let mut results = sample();
        let old = results.set("id", DataValue::from(7)).unwrap();
        assert_eq!(old, DataValue::from(6));
        assert_eq!(results["id"], DataValue::from(7));
        let keys: Vec<&String> = results.keys().collect();
        assert_eq!(keys, vec!["id", "displayName"]);
    }

    #[test]
    fn test_set_missing_key_is_rejected() {
        let mut results = sample();
        assert_eq!(
            results.set("extra", DataValue::Null),
            Err(AccessError::OutOfRange("extra".to_string()))
        );
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_unset() {
        let mut results = sample();
        assert_eq!(results.unset("missing"), None);
        assert_eq!(results.len(), 2);
        assert_eq!(results.unset("id"), Some(DataValue::from(6)));
        assert!(!results.contains_key("id"));
        // Once removed, a key cannot come back
        assert!(results.set("id", DataValue::from(1)).is_err());
    }

    #[test]
    #[should_panic(expected = "no value extracted under 'nope'")]
    fn test_index_missing_panics() {
        let results = sample();
        let _ = &results["nope"];
    }

    #[test]
    fn test_iteration_order() {
        let results = sample();
        let pairs: Vec<(&str, String)> = results
            .iter()
            .map(|(k, v)| (k.as_str(), v.to_string()))
            .collect();
        assert_eq!(pairs, vec![("id", "6".to_string()), ("displayName", "Foo".to_string())]);

        let values: Vec<DataValue> = results.into_values().collect();
        assert_eq!(values, vec![DataValue::from(6), DataValue::from("Foo")]);
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"id":6,"displayName":"Foo"}"#);
    }
}
