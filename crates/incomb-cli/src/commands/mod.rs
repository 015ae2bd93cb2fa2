//! Subcommands.

pub mod combine;
pub mod config;
pub mod inspect;

use std::path::PathBuf;

use incomb_core::IncombConfig;
use tracing::debug;

/// The configuration file a command reads, chosen by `-c` or the default location.
pub struct ConfigSource {
    pub path: PathBuf,
    /// Set when the path came from `-c`; a missing explicit file is an error.
    pub explicit: bool,
}

impl ConfigSource {
    pub fn resolve(config_path: Option<&str>) -> Self {
        match config_path {
            Some(path) => Self {
                path: PathBuf::from(path),
                explicit: true,
            },
            None => Self {
                path: dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("incomb")
                    .join("config.json"),
                explicit: false,
            },
        }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the file, falling back to defaults only when the default file is absent.
    pub fn load(&self) -> anyhow::Result<IncombConfig> {
        if self.explicit || self.exists() {
            debug!("Loading config from {}", self.path.display());
            return Ok(IncombConfig::from_file(&self.path)?);
        }

        Ok(IncombConfig::default())
    }
}

/// Load configuration from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<IncombConfig> {
    ConfigSource::resolve(config_path).load()
}
