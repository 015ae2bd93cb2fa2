//! Tokenizers for invoice-detail lines.

use csv::ReaderBuilder;

use crate::models::invoice::{LineFields, FIELDS_PER_LINE};

use super::identifier::is_exact_identifier;
use super::sanitize::{clean_numeric, sanitize_title, strip_token};

/// Tokenize one line as standard quoted CSV.
///
/// Returns `None` when the reader cannot produce a record at all.
pub fn csv_tokens(line: &str) -> Option<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let record = reader.records().next()?.ok()?;
    Some(record.iter().map(str::to_string).collect())
}

/// Strict path: accept a line only if it tokenizes to exactly nine fields.
///
/// A row whose identifier column is not a well-formed identifier is rejected
/// as well, empty columns included.
pub fn tokenize_strict(line: &str) -> Option<LineFields> {
    let tokens = csv_tokens(line)?;
    if tokens.len() != FIELDS_PER_LINE {
        return None;
    }

    let t: Vec<&str> = tokens.iter().map(|t| strip_token(t)).collect();
    if !is_exact_identifier(t[3]) {
        return None;
    }

    Some(LineFields {
        po: t[0].to_string(),
        external_id: t[1].to_string(),
        title: sanitize_title(t[2]),
        asin: t[3].to_string(),
        model: t[4].to_string(),
        freight_term: t[5].to_string(),
        qty: clean_numeric(t[6]),
        unit_cost: clean_numeric(t[7]),
        amount: clean_numeric(t[8]),
    })
}

/// Split on commas that sit outside double quotes.
///
/// A comma counts as a separator when an even number of `"` characters
/// follows it up to the end of the line. Unbalanced quotes therefore make
/// the split conservative rather than failing.
pub fn split_unquoted_commas(line: &str) -> Vec<&str> {
    let total_quotes = line.matches('"').count();
    let mut seen_quotes = 0;
    let mut parts = Vec::new();
    let mut start = 0;

    for (idx, c) in line.char_indices() {
        match c {
            '"' => seen_quotes += 1,
            ',' if (total_quotes - seen_quotes) % 2 == 0 => {
                parts.push(&line[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&line[start..]);

    parts
}
