//! Invoice-detail line recovery.

mod parser;
pub mod rules;

pub use parser::{invoice_number_from_name, InvoiceFileParser, ParsedFile, StrategyStats};
