//! Aggregation of recovered records across source files.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Result;
use crate::invoice::{InvoiceFileParser, StrategyStats};
use crate::models::config::IncombConfig;
use crate::models::invoice::{InvoiceLine, COLUMN_COUNT};
use crate::source::{discover, SourceLocation};

/// A file that could not be listed or read; the run continued without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWarning {
    pub path: PathBuf,
    pub message: String,
}

/// Per-file summary of a combine run.
#[derive(Debug, Clone)]
pub struct FileSummary {
    pub path: PathBuf,
    pub invoice_number: String,
    pub records: usize,
    pub skipped_lines: Vec<usize>,
    pub header_found: bool,
}

/// Aggregated output of a combine run.
#[derive(Debug, Clone, Default)]
pub struct CombineReport {
    /// Records from every file, in file then line order.
    pub records: Vec<InvoiceLine>,
    /// Files that could not be listed or read.
    pub warnings: Vec<FileWarning>,
    /// Files that were parsed, in processing order.
    pub files: Vec<FileSummary>,
    /// Strategy counters summed over all files.
    pub stats: StrategyStats,
}

impl CombineReport {
    /// Output rows in aggregate order.
    pub fn rows(&self) -> impl Iterator<Item = [&str; COLUMN_COUNT]> + '_ {
        self.records.iter().map(InvoiceLine::as_row)
    }

    /// Total data lines that were skipped.
    pub fn lines_skipped(&self) -> usize {
        self.stats.skipped
    }
}

/// Runs the line router over many files and concatenates the results.
pub struct Combiner {
    parser: InvoiceFileParser,
}

impl Combiner {
    /// Create a combiner around a file parser.
    pub fn new(parser: InvoiceFileParser) -> Self {
        Self { parser }
    }

    /// Create a combiner from configuration.
    pub fn from_config(config: &IncombConfig) -> Self {
        Self::new(InvoiceFileParser::from_config(&config.parsing))
    }

    /// The underlying file parser.
    pub fn parser(&self) -> &InvoiceFileParser {
        &self.parser
    }

    /// Parse `files` in order and concatenate their records.
    pub fn combine<P: AsRef<Path>>(&self, files: &[P]) -> CombineReport {
        self.combine_with(files, |_| {})
    }

    /// Like [`Combiner::combine`], calling `on_file` after each file.
    pub fn combine_with<P, F>(&self, files: &[P], mut on_file: F) -> CombineReport
    where
        P: AsRef<Path>,
        F: FnMut(&Path),
    {
        let mut report = CombineReport::default();

        for path in files {
            let path = path.as_ref();

            match self.parser.parse_file(path) {
                Ok(parsed) => {
                    report.stats.merge(&parsed.stats);
                    report.files.push(FileSummary {
                        path: path.to_path_buf(),
                        invoice_number: parsed.invoice_number,
                        records: parsed.records.len(),
                        skipped_lines: parsed.skipped_lines,
                        header_found: parsed.header_found,
                    });
                    report.records.extend(parsed.records);
                }
                Err(e) => {
                    warn!("Failed to read {}: {}", path.display(), e);
                    report.warnings.push(FileWarning {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    });
                }
            }

            on_file(path);
        }

        info!(
            "Combined {} records from {} files ({} lines skipped, {} unreadable files)",
            report.records.len(),
            report.files.len(),
            report.stats.skipped,
            report.warnings.len()
        );

        report
    }

    /// Discover files at `location` and combine them.
    ///
    /// Discovery failures are returned as errors. An empty discovery result
    /// is an empty report. Entries discovery could not inspect lead the
    /// report's warnings.
    pub fn run(&self, location: &SourceLocation, config: &IncombConfig) -> Result<CombineReport> {
        let sources = discover(location, &config.discovery)?;
        let mut report = self.combine(&sources.files);
        let mut warnings = sources.warnings;
        warnings.append(&mut report.warnings);
        report.warnings = warnings;
        Ok(report)
    }
}

impl Default for Combiner {
    fn default() -> Self {
        Self::new(InvoiceFileParser::new())
    }
}
