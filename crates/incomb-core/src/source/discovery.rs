//! Locating invoice-detail files in directories and archives.

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, info, warn};

use crate::combine::FileWarning;
use crate::error::{DiscoveryError, Result};
use crate::models::config::DiscoveryConfig;

use super::SourceLocation;

/// Files found by discovery, in discovery order.
///
/// For archives the extraction directory lives as long as this value and is
/// removed when it is dropped.
#[derive(Debug)]
pub struct DiscoveredSources {
    /// Matching files.
    pub files: Vec<PathBuf>,
    /// Entries the glob walk could not inspect.
    pub warnings: Vec<FileWarning>,
    #[cfg(feature = "archive")]
    workdir: Option<tempfile::TempDir>,
}

impl DiscoveredSources {
    /// Whether no file matched.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Directory the archive was extracted into, if any.
    pub fn workdir(&self) -> Option<&Path> {
        #[cfg(feature = "archive")]
        {
            self.workdir.as_ref().map(|d| d.path())
        }
        #[cfg(not(feature = "archive"))]
        {
            None
        }
    }

    fn from_files(files: Vec<PathBuf>, warnings: Vec<FileWarning>) -> Self {
        Self {
            files,
            warnings,
            #[cfg(feature = "archive")]
            workdir: None,
        }
    }
}

/// Discover source files at a location.
pub fn discover(location: &SourceLocation, config: &DiscoveryConfig) -> Result<DiscoveredSources> {
    match location {
        SourceLocation::Directory(dir) => discover_directory(dir, &config.pattern),
        #[cfg(feature = "archive")]
        SourceLocation::Archive(path) => discover_archive(path, &config.pattern),
        #[cfg(not(feature = "archive"))]
        SourceLocation::Archive(_) => Err(DiscoveryError::ArchiveUnsupported.into()),
    }
}

/// List files directly inside `dir` whose names match `pattern`.
pub fn discover_directory(dir: &Path, pattern: &str) -> Result<DiscoveredSources> {
    if !dir.is_dir() {
        return Err(DiscoveryError::MissingDirectory(dir.to_path_buf()).into());
    }

    let (files, warnings) = glob_files(dir, pattern, false)?;
    info!("Found {} source files in {}", files.len(), dir.display());

    Ok(DiscoveredSources::from_files(files, warnings))
}

/// Extract a ZIP archive to a scratch directory and list every file below it
/// whose name matches `pattern`.
#[cfg(feature = "archive")]
pub fn discover_archive(path: &Path, pattern: &str) -> Result<DiscoveredSources> {
    use std::fs::File;
    use zip::ZipArchive;

    let archive_error = |reason: String| DiscoveryError::Archive {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| archive_error(e.to_string()))?;
    let mut archive = ZipArchive::new(file).map_err(|e| archive_error(e.to_string()))?;

    let workdir = tempfile::Builder::new().prefix("incomb-").tempdir()?;
    debug!(
        "Extracting {} entries from {} to {}",
        archive.len(),
        path.display(),
        workdir.path().display()
    );
    archive
        .extract(workdir.path())
        .map_err(|e| archive_error(e.to_string()))?;

    let (files, warnings) = glob_files(workdir.path(), pattern, true)?;
    info!("Found {} source files in {}", files.len(), path.display());

    Ok(DiscoveredSources {
        files,
        warnings,
        workdir: Some(workdir),
    })
}

fn glob_files(
    base: &Path,
    pattern: &str,
    recursive: bool,
) -> Result<(Vec<PathBuf>, Vec<FileWarning>)> {
    Pattern::new(pattern).map_err(|e| DiscoveryError::Pattern(e.to_string()))?;

    let base = Pattern::escape(&base.to_string_lossy());
    let full = if recursive {
        format!("{}/**/{}", base, pattern)
    } else {
        format!("{}/{}", base, pattern)
    };

    let paths = glob::glob(&full).map_err(|e| DiscoveryError::Pattern(e.to_string()))?;
    let entries = paths.map(|r| {
        r.map_err(|e| FileWarning {
            path: e.path().to_path_buf(),
            message: e.error().to_string(),
        })
    });

    Ok(split_entries(entries))
}

/// Separate glob entries into matching files (sorted) and unreadable entries.
fn split_entries<I>(entries: I) -> (Vec<PathBuf>, Vec<FileWarning>)
where
    I: IntoIterator<Item = std::result::Result<PathBuf, FileWarning>>,
{
    let mut files = Vec::new();
    let mut warnings = Vec::new();

    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(warning) => {
                warn!("Skipping {}: {}", warning.path.display(), warning.message);
                warnings.push(warning);
            }
        }
    }
    files.sort();

    (files, warnings)
}
