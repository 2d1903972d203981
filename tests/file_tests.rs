//! Integration tests for loading sources and transition lists, and writing results.

use datatransit::config::OutputFormat;
use datatransit::document::DataValue;
use datatransit::file::loader::{load_source_file, load_transitions_file};
use datatransit::file::writer::{render, write_results};
use datatransit::transition::DataTransition;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

fn temp_with_suffix(suffix: &str, content: &[u8]) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_json_source() {
    let file = temp_with_suffix(".json", br#"{"user": {"name": "Alice", "age": 30}}"#);
    let source = load_source_file(file.path()).unwrap();

    let transition = DataTransition::new(["user>age#integer"], &source).unwrap();
    assert_eq!(transition["age"], DataValue::from(30));
}

#[test]
fn test_load_yaml_source() {
    let file = temp_with_suffix(".yaml", b"user:\n  name: Alice\n  tags: [a, b]\n");
    let source = load_source_file(file.path()).unwrap();

    let transition = DataTransition::new(["user>tags>1|secondTag"], &source).unwrap();
    assert_eq!(transition["secondTag"], DataValue::from("b"));
}

#[test]
fn test_load_gzipped_source() {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(br#"{"id": 6}"#).unwrap();
    let compressed = encoder.finish().unwrap();

    let file = temp_with_suffix(".json.gz", &compressed);
    let source = load_source_file(file.path()).unwrap();
    assert_eq!(source.get("id"), Some(&DataValue::from(6)));
}

#[test]
fn test_load_invalid_source_fails() {
    let file = temp_with_suffix(".json", b"{\"id\": ");
    assert!(load_source_file(file.path()).is_err());
    assert!(load_source_file("/nonexistent/source.json").is_err());
}

#[test]
fn test_load_transitions_file() {
    let file = temp_with_suffix(".yml", b"- id#integer\n- name|displayName\n- 6\n");
    let transitions = load_transitions_file(file.path()).unwrap();
    assert_eq!(
        transitions,
        vec![
            DataValue::from("id#integer"),
            DataValue::from("name|displayName"),
            DataValue::from(6),
        ]
    );
}

#[test]
fn test_transitions_file_must_be_a_list() {
    let file = temp_with_suffix(".json", br#"{"id": "integer"}"#);
    let err = load_transitions_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("must contain a list"));
}

#[test]
fn test_render_results() {
    let source = DataValue::Object(
        [
            ("id".to_string(), DataValue::from(6)),
            ("name".to_string(), DataValue::from("Foo")),
        ]
        .into_iter()
        .collect(),
    );
    let transition = DataTransition::new(["name|displayName", "id"], &source).unwrap();

    let compact = render(transition.results(), OutputFormat::Json, false).unwrap();
    assert_eq!(compact, "{\"displayName\":\"Foo\",\"id\":6}\n");

    let yaml = render(transition.results(), OutputFormat::Yaml, true).unwrap();
    assert_eq!(yaml, "displayName: Foo\nid: 6\n");

    let mut out = Vec::new();
    write_results(&mut out, transition.results(), OutputFormat::Json, true).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("{\n"));
    assert!(text.contains("\"displayName\": \"Foo\""));
}
