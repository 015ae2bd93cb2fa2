//! Error types for the incomb-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the incomb library.
#[derive(Error, Debug)]
pub enum IncombError {
    /// Source discovery failed; fatal for a run.
    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while locating source files.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The directory to scan does not exist or is not a directory.
    #[error("directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// The archive could not be opened or extracted.
    #[error("cannot extract archive {}: {reason}", path.display())]
    Archive { path: PathBuf, reason: String },

    /// The discovery glob is invalid.
    #[error("invalid discovery pattern: {0}")]
    Pattern(String),

    /// Archive support was compiled out.
    #[error("archive support is not enabled in this build")]
    ArchiveUnsupported,
}

/// Result type for the incomb library.
pub type Result<T> = std::result::Result<T, IncombError>;
