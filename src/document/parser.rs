//! Conversion of parsed JSON and YAML into `DataValue` documents.
//!
//! Text is handed to `serde_json` / `serde_yaml` first and the resulting
//! generic values are converted into our own representation. Object key order
//! is preserved in both cases.
//!
//! # Example
//!
//! ```
//! use datatransit::document::parser::parse_json;
//!
//! let doc = parse_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
//! assert_eq!(doc.get("age").and_then(|v| v.as_i64()), Some(30));
//! ```

use super::node::{DataNumber, DataValue};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// Parses a JSON string into a `DataValue`.
pub fn parse_json(json_str: &str) -> Result<DataValue> {
    let value: JsonValue = serde_json::from_str(json_str).context("Failed to parse JSON")?;
    Ok(json_to_value(&value))
}

/// Parses a YAML string into a `DataValue`.
///
/// Only the first document of a multi-document stream is read.
pub fn parse_yaml(yaml_str: &str) -> Result<DataValue> {
    let value: YamlValue = serde_yaml::from_str(yaml_str).context("Failed to parse YAML")?;
    Ok(yaml_to_value(&value))
}

/// Converts a `serde_json::Value` into a `DataValue`.
pub fn json_to_value(value: &JsonValue) -> DataValue {
    match value {
        JsonValue::Null => DataValue::Null,
        JsonValue::Bool(b) => DataValue::Boolean(*b),
        JsonValue::Number(n) => DataValue::Number(json_number(n)),
        JsonValue::String(s) => DataValue::String(s.clone()),
        JsonValue::Array(items) => DataValue::Array(items.iter().map(json_to_value).collect()),
        JsonValue::Object(map) => DataValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_value(v)))
                .collect::<IndexMap<_, _>>(),
        ),
    }
}

/// Converts a `serde_yaml::Value` into a `DataValue`.
///
/// Mapping keys that are not strings (`1: one`, `true: yes`) are rendered to
/// their scalar text. Tags are dropped and the tagged value is kept.
pub fn yaml_to_value(value: &YamlValue) -> DataValue {
    match value {
        YamlValue::Null => DataValue::Null,
        YamlValue::Bool(b) => DataValue::Boolean(*b),
        YamlValue::Number(n) => DataValue::Number(yaml_number(n)),
        YamlValue::String(s) => DataValue::String(s.clone()),
        YamlValue::Sequence(items) => DataValue::Array(items.iter().map(yaml_to_value).collect()),
        YamlValue::Mapping(map) => DataValue::Object(
            map.iter()
                .map(|(k, v)| (yaml_key_to_string(k), yaml_to_value(v)))
                .collect::<IndexMap<_, _>>(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_value(&tagged.value),
    }
}

impl DataValue {
    /// Builds a document from an already parsed `serde_json::Value`.
    pub fn from_json(value: &JsonValue) -> Self {
        json_to_value(value)
    }

    /// Builds a document from an already parsed `serde_yaml::Value`.
    pub fn from_yaml(value: &YamlValue) -> Self {
        yaml_to_value(value)
    }
}

fn json_number(n: &serde_json::Number) -> DataNumber {
    if let Some(i) = n.as_i64() {
        DataNumber::Integer(i)
    } else if let Some(u) = n.as_u64() {
        DataNumber::Unsigned(u)
    } else {
        DataNumber::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn yaml_number(n: &serde_yaml::Number) -> DataNumber {
    if let Some(i) = n.as_i64() {
        DataNumber::Integer(i)
    } else if let Some(u) = n.as_u64() {
        DataNumber::Unsigned(u)
    } else {
        DataNumber::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn yaml_key_to_string(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_preserves_key_order() {
        let doc = parse_json(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        match doc {
            DataValue::Object(entries) => {
                let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
            }
            _ => panic!("Root should be object"),
        }
    }

    #[test]
    fn test_parse_json_numbers() {
        let doc = parse_json(r#"{"i": 6, "f": 1.5}"#).unwrap();
        assert_eq!(doc.get("i"), Some(&DataValue::Number(DataNumber::Integer(6))));
        assert_eq!(doc.get("f"), Some(&DataValue::Number(DataNumber::Float(1.5))));
    }

    #[test]
    fn test_integers_above_i64_stay_exact() {
        let doc = parse_json(r#"{"id": 18446744073709551615}"#).unwrap();
        assert_eq!(
            doc.get("id"),
            Some(&DataValue::Number(DataNumber::Unsigned(u64::MAX)))
        );
        assert_eq!(doc.get("id").map(DataValue::type_name), Some("integer"));
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"id":18446744073709551615}"#);

        let yaml = parse_yaml("id: 18446744073709551615
").unwrap();
        assert_eq!(
            yaml.get("id"),
            Some(&DataValue::Number(DataNumber::Unsigned(u64::MAX)))
        );
    }

    #[test]
    fn test_from_serde_values() {
        let json: JsonValue = serde_json::from_str(r#"{"a": [1, "two", null]}"#).unwrap();
        let doc = DataValue::from_json(&json);
        assert_eq!(doc, parse_json(r#"{"a": [1, "two", null]}"#).unwrap());

        let yaml: YamlValue = serde_yaml::from_str("a:\n  b: true\n").unwrap();
        let doc = DataValue::from_yaml(&yaml);
        assert_eq!(
            doc.get("a").and_then(|a| a.get("b")),
            Some(&DataValue::Boolean(true))
        );
    }

    #[test]
    fn test_parse_json_invalid() {
        assert!(parse_json("{not json").is_err());
    }

    #[test]
    fn test_parse_simple_yaml() {
        let yaml = r#"
name: Test
count: 42
enabled: true
parent: ~
"#;

        let doc = parse_yaml(yaml).expect("Failed to parse YAML");
        assert_eq!(doc.len(), 4);
        assert_eq!(doc.get("name"), Some(&DataValue::from("Test")));
        assert_eq!(doc.get("count").and_then(|v| v.as_i64()), Some(42));
        assert_eq!(doc.get("enabled"), Some(&DataValue::Boolean(true)));
        assert_eq!(doc.get("parent"), Some(&DataValue::Null));
    }

    #[test]
    fn test_yaml_non_string_keys() {
        let doc = parse_yaml("1: one\ntrue: yes\n").unwrap();
        assert_eq!(doc.get("1"), Some(&DataValue::from("one")));
        assert_eq!(doc.get("true"), Some(&DataValue::from("yes")));
    }

    #[test]
    fn test_parse_yaml_array() {
        let doc = parse_yaml("- Alice\n- Bob\n- Carol\n").unwrap();
        match doc {
            DataValue::Array(arr) => {
                assert_eq!(arr.len(), 3);
                assert_eq!(arr[0], DataValue::from("Alice"));
            }
            _ => panic!("Root should be array"),
        }
    }
}
