//! Source file discovery and reading.

mod discovery;

pub use discovery::{discover, discover_directory, DiscoveredSources};
#[cfg(feature = "archive")]
pub use discovery::discover_archive;

use std::path::{Path, PathBuf};

/// Where source files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// A ZIP archive to extract and search recursively.
    Archive(PathBuf),
    /// A directory to search (non-recursive).
    Directory(PathBuf),
}

impl SourceLocation {
    /// Path of the archive or directory.
    pub fn path(&self) -> &Path {
        match self {
            SourceLocation::Archive(p) | SourceLocation::Directory(p) => p,
        }
    }
}

/// Read a source file as text, replacing invalid UTF-8 sequences.
pub fn read_source(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode_lossy(bytes))
}

/// Decode bytes as UTF-8 without failing. A leading byte-order mark is dropped.
pub fn decode_lossy(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };

    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}
