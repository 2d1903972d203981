//! Configuration system for datatransit.
//!
//! This module provides the configuration structure for the `datatransit`
//! command with sensible defaults and support for serialization via serde.
//! Configuration is loaded from a TOML file and merged with command-line
//! arguments, which always win.
//!
//! # Example
//!
//! ```
//! use datatransit::config::{Config, OutputFormat};
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.output_format, OutputFormat::Json);
//! assert!(config.pretty);
//!
//! // Create custom configuration
//! let custom = Config {
//!     output_format: OutputFormat::Yaml,
//!     ..Config::default()
//! };
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// How extracted results are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Configuration for the datatransit command.
///
/// # Fields
///
/// * `output_format` - Format results are printed in (default: json)
/// * `pretty` - Pretty-print JSON output (default: true)
/// * `log_level` - Log level when neither `-v` nor `RUST_LOG` is given (default: "warn")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Format results are printed in
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Default log level: "error", "warn", "info", "debug" or "trace"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Returns the default output format.
fn default_output_format() -> OutputFormat {
    OutputFormat::Json
}

/// Returns the default for pretty printing.
fn default_pretty() -> bool {
    true
}

/// Returns the default log level.
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            pretty: default_pretty(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/datatransit/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("datatransit");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if there is no home directory or no
    /// config file. A file that can't be read or parsed is an error.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file.
    pub fn load_from(config_path: &std::path::Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config {}", config_path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to a specific file.
    pub fn save_to(&self, config_path: &std::path::Path) -> anyhow::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(config_path, toml_string)?;

        Ok(())
    }
}
