//! Line router: header detection and the strict-then-repair cascade.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::models::config::ParsingConfig;
use crate::models::invoice::{InvoiceLine, LineOutcome, Strategy};
use crate::source::read_source;

use super::rules::{tokenize_strict, RepairEngine};

/// Per-strategy counters for parsed and skipped lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrategyStats {
    pub strict: usize,
    pub anchored_title: usize,
    pub generic_split: usize,
    pub token_scan: usize,
    pub skipped: usize,
}

impl StrategyStats {
    /// Count one line outcome.
    pub fn record(&mut self, strategy: Option<Strategy>) {
        match strategy {
            Some(Strategy::Strict) => self.strict += 1,
            Some(Strategy::AnchoredTitle) => self.anchored_title += 1,
            Some(Strategy::GenericSplit) => self.generic_split += 1,
            Some(Strategy::TokenScan) => self.token_scan += 1,
            None => self.skipped += 1,
        }
    }

    /// Add another set of counters to this one.
    pub fn merge(&mut self, other: &StrategyStats) {
        self.strict += other.strict;
        self.anchored_title += other.anchored_title;
        self.generic_split += other.generic_split;
        self.token_scan += other.token_scan;
        self.skipped += other.skipped;
    }

    /// Count for a single strategy.
    pub fn get(&self, strategy: Strategy) -> usize {
        match strategy {
            Strategy::Strict => self.strict,
            Strategy::AnchoredTitle => self.anchored_title,
            Strategy::GenericSplit => self.generic_split,
            Strategy::TokenScan => self.token_scan,
        }
    }

    /// Lines that produced a record.
    pub fn parsed(&self) -> usize {
        self.strict + self.anchored_title + self.generic_split + self.token_scan
    }
}

/// Result of parsing one source file.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    /// Invoice number derived from the file name.
    pub invoice_number: String,
    /// Recovered records in line order.
    pub records: Vec<InvoiceLine>,
    /// 1-based line numbers of data lines no strategy could recover.
    pub skipped_lines: Vec<usize>,
    /// Whether a header line was found.
    pub header_found: bool,
    /// Per-strategy counters.
    pub stats: StrategyStats,
}

/// Take the leading `digits` characters of a file name if they are all
/// ASCII digits; otherwise an empty string.
pub fn invoice_number_from_name(name: &str, digits: usize) -> String {
    match name.get(..digits) {
        Some(prefix) if digits > 0 && prefix.bytes().all(|b| b.is_ascii_digit()) => {
            prefix.to_string()
        }
        _ => String::new(),
    }
}

/// Parser for invoice-detail files.
pub struct InvoiceFileParser {
    header_markers: Vec<String>,
    invoice_number_digits: usize,
    repair: RepairEngine,
}

impl InvoiceFileParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ParsingConfig::default())
    }

    /// Create a parser from parsing configuration.
    pub fn from_config(config: &ParsingConfig) -> Self {
        Self {
            header_markers: config.header_markers.clone(),
            invoice_number_digits: config.invoice_number_digits,
            repair: RepairEngine::new(),
        }
    }

    /// Set the header markers.
    pub fn with_header_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the invoice number length.
    pub fn with_invoice_number_digits(mut self, digits: usize) -> Self {
        self.invoice_number_digits = digits;
        self
    }

    /// Invoice number for a file name.
    pub fn invoice_number(&self, file_name: &str) -> String {
        invoice_number_from_name(file_name, self.invoice_number_digits)
    }

    /// Whether a trimmed, non-blank line is the column header.
    ///
    /// With no markers configured the first non-blank line is the header.
    pub fn is_header(&self, line: &str) -> bool {
        self.header_markers.iter().all(|m| line.contains(m.as_str()))
    }

    /// Run one data line through the strict tokenizer, then the repair engine.
    pub fn classify_line(&self, raw: &str) -> LineOutcome {
        if let Some(fields) = tokenize_strict(raw) {
            return LineOutcome::Parsed {
                fields,
                strategy: Strategy::Strict,
            };
        }

        match self.repair.repair(raw) {
            Some((fields, strategy)) => LineOutcome::Parsed { fields, strategy },
            None => LineOutcome::Skipped,
        }
    }

    /// Data lines of a file: non-blank lines after the header, with their
    /// 1-based line numbers. `None` when no header line is present.
    pub fn data_lines<'a>(&self, text: &'a str) -> Option<Vec<(usize, &'a str)>> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, raw)| (idx + 1, raw))
            .filter(|(_, raw)| !raw.trim().is_empty());

        let (header_at, _) = lines.by_ref().find(|(_, raw)| self.is_header(raw.trim()))?;
        debug!("Header found at line {}", header_at);

        Some(lines.collect())
    }

    /// Parse the text of one file. `file_name` supplies the invoice number.
    pub fn parse_str(&self, file_name: &str, text: &str) -> ParsedFile {
        let mut parsed = ParsedFile {
            invoice_number: self.invoice_number(file_name),
            ..ParsedFile::default()
        };

        let Some(lines) = self.data_lines(text) else {
            warn!("No header line found in {}", file_name);
            return parsed;
        };
        parsed.header_found = true;

        for (line_no, raw) in lines {
            let outcome = self.classify_line(raw);
            parsed.stats.record(outcome.strategy());

            match outcome {
                LineOutcome::Parsed { fields, strategy } => {
                    debug!("Line {} of {} parsed by {}", line_no, file_name, strategy);
                    parsed
                        .records
                        .push(InvoiceLine::new(parsed.invoice_number.clone(), fields));
                }
                LineOutcome::Skipped => {
                    debug!("Line {} of {} skipped: no strategy matched", line_no, file_name);
                    parsed.skipped_lines.push(line_no);
                }
            }
        }

        parsed
    }

    /// Read and parse one file from disk.
    pub fn parse_file(&self, path: &Path) -> std::io::Result<ParsedFile> {
        let text = read_source(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let parsed = self.parse_str(&file_name, &text);
        info!(
            "Parsed {}: {} records, {} skipped",
            path.display(),
            parsed.records.len(),
            parsed.skipped_lines.len()
        );

        Ok(parsed)
    }
}

impl Default for InvoiceFileParser {
    fn default() -> Self {
        Self::new()
    }
}
