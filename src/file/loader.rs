//! Source document and transition list loading.
//!
//! This module reads JSON or YAML documents from files or stdin and turns them
//! into `DataValue`s the transition engine can walk. Files ending in `.gz`
//! are decompressed first.

use crate::document::parser::{parse_json, parse_yaml};
use crate::document::DataValue;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Document formats recognised from a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
    /// Unknown extension: JSON is tried first, then YAML
    Detect,
}

/// Loads and parses a source document from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use datatransit::file::loader::load_source_file;
///
/// let source = load_source_file("account.json").unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - A `.gz` file is not valid gzip
/// - The contents are not valid JSON or YAML
pub fn load_source_file<P: AsRef<Path>>(path: P) -> Result<DataValue> {
    let path_ref = path.as_ref();
    let content = read_file_content(path_ref)?;
    parse_content(&content, determine_format(path_ref))
        .with_context(|| format!("Failed to load {}", path_ref.display()))
}

/// Loads and parses a source document from standard input.
///
/// Gzip input is detected by its magic bytes. The content is parsed as JSON
/// if possible, otherwise as YAML.
pub fn load_source_from_stdin() -> Result<DataValue> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = decode_bytes(buffer)?;
    parse_content(&content, SourceFormat::Detect)
        .context("Failed to parse stdin: input is neither valid JSON nor valid YAML")
}

/// Loads a list of transitions from a JSON or YAML file.
///
/// Entries are returned untouched; checking that each one is a string is left
/// to [`DataTransition::from_values`](crate::transition::DataTransition::from_values).
pub fn load_transitions_file<P: AsRef<Path>>(path: P) -> Result<Vec<DataValue>> {
    let path_ref = path.as_ref();
    let content = read_file_content(path_ref)?;
    let document = parse_content(&content, determine_format(path_ref))
        .with_context(|| format!("Failed to load transitions from {}", path_ref.display()))?;

    match document {
        DataValue::Array(items) => Ok(items),
        other => anyhow::bail!(
            "Transitions file {} must contain a list, found {}",
            path_ref.display(),
            other.type_name()
        ),
    }
}

/// Parses document text in the given format.
pub fn parse_content(content: &str, format: SourceFormat) -> Result<DataValue> {
    match format {
        SourceFormat::Json => parse_json(content),
        SourceFormat::Yaml => parse_yaml(content),
        SourceFormat::Detect => parse_json(content).or_else(|_| parse_yaml(content)),
    }
}

/// Determines the document format from a file name.
///
/// A `.gz` suffix is ignored. Examples:
/// - `data.json` → Json
/// - `data.yml.gz` → Yaml
/// - `data.txt` → Detect
pub fn determine_format<P: AsRef<Path>>(path: P) -> SourceFormat {
    let path_str = path.as_ref().to_string_lossy().to_lowercase();
    let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

    if base.ends_with(".json") {
        SourceFormat::Json
    } else if base.ends_with(".yaml") || base.ends_with(".yml") {
        SourceFormat::Yaml
    } else {
        SourceFormat::Detect
    }
}

fn read_file_content(path: &Path) -> Result<String> {
    let is_gzipped = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    if is_gzipped {
        read_gzipped_file(path)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file(path: &Path) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file")?;
    Ok(content)
}

/// Turns raw input into text, decompressing it when it starts with the gzip magic bytes.
fn decode_bytes(buffer: Vec<u8>) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    if buffer.starts_with(&[0x1f, 0x8b]) {
        let mut decoder = GzDecoder::new(buffer.as_slice());
        let mut content = String::new();
        decoder
            .read_to_string(&mut content)
            .context("Failed to decompress gzip data")?;
        Ok(content)
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determine_format() {
        assert_eq!(determine_format("a.json"), SourceFormat::Json);
        assert_eq!(determine_format("a.JSON.gz"), SourceFormat::Json);
        assert_eq!(determine_format("a.yml"), SourceFormat::Yaml);
        assert_eq!(determine_format("a.yaml.gz"), SourceFormat::Yaml);
        assert_eq!(determine_format("a.txt"), SourceFormat::Detect);
    }

    #[test]
    fn test_detect_falls_back_to_yaml() {
        let doc = parse_content("id: 6\nname: Foo\n", SourceFormat::Detect).unwrap();
        assert_eq!(doc.get("name"), Some(&DataValue::from("Foo")));
    }

    #[test]
    fn test_decode_plain_bytes() {
        assert_eq!(decode_bytes(b"{}".to_vec()).unwrap(), "{}");
        assert!(decode_bytes(vec![0xff, 0xfe]).is_err());
    }

    fn gzip(data: &[u8]) -> Vec<u8> {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_decode_gzipped_json() {
        let text = decode_bytes(gzip(br#"{"id": 6}"#)).unwrap();
        assert_eq!(text, r#"{"id": 6}"#);

        let doc = parse_content(&text, SourceFormat::Detect).unwrap();
        assert_eq!(doc.get("id"), Some(&DataValue::from(6)));
    }

    #[test]
    fn test_decode_gzipped_yaml_falls_back_from_json() {
        let text = decode_bytes(gzip(b"id: 6\nname: Foo\n")).unwrap();
        let doc = parse_content(&text, SourceFormat::Detect).unwrap();
        assert_eq!(doc.get("id"), Some(&DataValue::from(6)));
        assert_eq!(doc.get("name"), Some(&DataValue::from("Foo")));
    }

    #[test]
    fn test_decode_corrupt_gzip_fails() {
        assert!(decode_bytes(vec![0x1f, 0x8b, 0x00, 0x01]).is_err());
    }
}
