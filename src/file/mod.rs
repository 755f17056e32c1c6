//! Document file I/O for the CLI.

pub mod loader;
pub mod saver;

/// On-disk serialization format of a document file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Picks the format from a file name, looking through a trailing `.gz`.
    /// Unknown extensions default to JSON.
    pub fn from_path(path: &std::path::Path) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        if name.ends_with(".yaml") || name.ends_with(".yml") {
            FileFormat::Yaml
        } else {
            FileFormat::Json
        }
    }
}
