//! Core library for recovering invoice line items from invoice-detail files.
//!
//! This crate provides:
//! - Value sanitizing and product identifier matching
//! - Strict quoted-CSV tokenization with a three-step regex repair fallback
//! - Per-file line routing (invoice number, header detection, silent skips)
//! - Source discovery in directories and ZIP archives
//! - Aggregation of records across files

pub mod combine;
pub mod error;
pub mod invoice;
pub mod models;
pub mod source;

pub use combine::{CombineReport, Combiner, FileSummary, FileWarning};
pub use error::{DiscoveryError, IncombError, Result};
pub use invoice::{InvoiceFileParser, ParsedFile, StrategyStats};
pub use models::config::IncombConfig;
pub use models::invoice::{InvoiceLine, LineFields, LineOutcome, Strategy, COLUMNS, COLUMN_COUNT};
pub use source::{discover, read_source, DiscoveredSources, SourceLocation};
