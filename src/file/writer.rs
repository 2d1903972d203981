//! Rendering of extracted results.
//!
//! Results are serialized through serde, so object keys come out in the same
//! order the transitions produced them.

use crate::config::OutputFormat;
use crate::transition::ResultSet;
use anyhow::{Context, Result};
use std::io::Write;

/// Renders a result set as text in the requested format.
///
/// `pretty` only affects JSON; YAML is always block style.
pub fn render(results: &ResultSet, format: OutputFormat, pretty: bool) -> Result<String> {
    let mut text = match format {
        OutputFormat::Json if pretty => {
            serde_json::to_string_pretty(results).context("Failed to serialize results as JSON")?
        }
        OutputFormat::Json => {
            serde_json::to_string(results).context("Failed to serialize results as JSON")?
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(results).context("Failed to serialize results as YAML")?
        }
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

/// Renders a result set and writes it to `out`.
pub fn write_results<W: Write>(
    out: &mut W,
    results: &ResultSet,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    let text = render(results, format, pretty)?;
    out.write_all(text.as_bytes())
        .context("Failed to write results")?;
    out.flush().context("Failed to flush output")?;
    Ok(())
}
