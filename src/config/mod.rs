//! Configuration system for the docpath CLI.
//!
//! Settings are loaded from a TOML file in the user's config directory and
//! merged with command-line arguments (arguments win). Every field has a
//! sensible default, so a missing or partial config file is fine.
//!
//! # Example
//!
//! ```
//! use docpath::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.output_format, "json");
//! assert_eq!(config.indent_size, 2);
//!
//! let custom = Config {
//!     output_format: "yaml".to_string(),
//!     ..Config::default()
//! };
//! assert!(!custom.create_backup);
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configuration for the docpath CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Output serialization format: "json" or "yaml"
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Number of spaces per indentation level in JSON output
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Create .bak files before writing a document in place
    #[serde(default)]
    pub create_backup: bool,
}

fn default_output_format() -> String {
    "json".to_string()
}

fn default_indent_size() -> usize {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            indent_size: default_indent_size(),
            create_backup: false,
        }
    }
}

impl Config {
    /// Location of the user's config file, if a config directory exists.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docpath").join("config.toml"))
    }

    /// Loads the user's config file, falling back to defaults when the file
    /// does not exist.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads a config file from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
