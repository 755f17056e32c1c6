//! Document loading.
//!
//! Loads JSON or YAML documents from disk or stdin into [`DocValue`]
//! structures. Format is picked from the file extension, and `.gz` files are
//! decompressed transparently.

use super::FileFormat;
use crate::document::parser::{parse_json, parse_yaml};
use crate::document::value::DocValue;
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Loads and parses a document file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or its contents fail to
/// parse in the format its extension indicates.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<DocValue> {
    let path = path.as_ref();

    let is_gzipped = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path)?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?
    };

    parse_content(&content, FileFormat::from_path(path))
}

/// Reads a document from stdin in the given format.
pub fn load_from_stdin(format: FileFormat) -> Result<DocValue> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;
    parse_content(&content, format)
}

fn parse_content(content: &str, format: FileFormat) -> Result<DocValue> {
    match format {
        FileFormat::Json => parse_json(content),
        FileFormat::Yaml => parse_yaml(content),
    }
}

fn read_gzipped_file(path: &Path) -> Result<String> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .with_context(|| format!("Failed to decompress file: {}", path.display()))?;
    Ok(content)
}
