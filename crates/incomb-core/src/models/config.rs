//! Configuration structures for the combiner.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{IncombError, Result};

/// Main configuration for incomb.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncombConfig {
    /// Source file discovery.
    pub discovery: DiscoveryConfig,

    /// Line parsing.
    pub parsing: ParsingConfig,

    /// Output naming and formats.
    pub output: OutputConfig,
}

/// Source discovery configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// File name glob matched against candidate source files.
    pub pattern: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            pattern: "*invoice_details.csv".to_string(),
        }
    }
}

/// Line parsing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Literal markers that must all appear in the header line.
    pub header_markers: Vec<String>,

    /// Length of the digit run at the start of a file name that forms the
    /// invoice number.
    pub invoice_number_digits: usize,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            header_markers: vec!["PO #".to_string(), "External ID".to_string()],
            invoice_number_digits: 6,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name (without extension) of the combined output.
    pub base_name: String,

    /// Formats written when none are given on the command line.
    pub formats: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_name: "master_invoice_combined_cleaned".to_string(),
            formats: vec!["csv".to_string(), "xlsx".to_string()],
        }
    }
}

impl IncombConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| IncombError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| IncombError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
