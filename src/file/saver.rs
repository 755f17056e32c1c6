//! Document saving.
//!
//! Serializes [`DocValue`] structures back to disk in the format the target
//! extension indicates, recompressing `.gz` targets and optionally keeping a
//! `.bak` copy of the previous contents.

use super::FileFormat;
use crate::config::Config;
use crate::document::parser::{to_json_string, to_yaml_string};
use crate::document::value::DocValue;
use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Serializes `value` and writes it to `path`.
///
/// With `config.create_backup` set and an existing target, the previous file
/// is first copied to `<name>.bak`.
pub fn save_document<P: AsRef<Path>>(path: P, value: &DocValue, config: &Config) -> Result<()> {
    let path = path.as_ref();

    if config.create_backup && path.exists() {
        let backup = backup_path(path);
        fs::copy(path, &backup)
            .with_context(|| format!("Failed to create backup: {}", backup.display()))?;
    }

    let content = render(value, FileFormat::from_path(path), config.indent_size)?;

    let is_gzipped = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    if is_gzipped {
        write_gzipped(path, &content)
    } else {
        fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }
}

/// Serializes `value` in `format` for printing.
pub fn render(value: &DocValue, format: FileFormat, indent: usize) -> Result<String> {
    match format {
        FileFormat::Json => {
            let mut text = to_json_string(value, indent)?;
            text.push('\n');
            Ok(text)
        }
        FileFormat::Yaml => to_yaml_string(value),
    }
}

fn backup_path(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

fn write_gzipped(path: &Path, content: &str) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(content.as_bytes())
        .with_context(|| format!("Failed to compress file: {}", path.display()))?;
    encoder
        .finish()
        .with_context(|| format!("Failed to finish compressing: {}", path.display()))?;
    Ok(())
}
