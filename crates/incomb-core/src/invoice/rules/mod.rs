//! Rule-based recovery of invoice-detail lines.

pub mod identifier;
pub mod patterns;
pub mod repair;
pub mod sanitize;
pub mod tokenizer;

pub use identifier::{find_identifier, is_exact_identifier, IdentifierMatch};
pub use repair::{normalize_line, AnchoredTitle, GenericSplit, RepairEngine, RepairStrategy, TokenScan};
pub use sanitize::{clean_numeric, clean_optional_numeric, sanitize_optional_title, sanitize_title};
pub use tokenizer::{csv_tokens, split_unquoted_commas, tokenize_strict};
