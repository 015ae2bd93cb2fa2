//! Regex repair engine for lines the strict tokenizer rejects.
//!
//! Three strategies run in a fixed order and the first one that produces
//! fields wins. Each is a pure `line -> Option<LineFields>` function behind
//! the [`RepairStrategy`] trait so it can be exercised on its own.

use regex::Captures;
use tracing::trace;

use crate::models::invoice::{LineFields, Strategy, FIELDS_PER_LINE};

use super::identifier::{find_identifier, is_exact_identifier};
use super::patterns::{ANCHORED_TITLE_LINE, GENERIC_SPLIT_LINE};
use super::sanitize::{clean_numeric, sanitize_title, strip_token};
use super::tokenizer::split_unquoted_commas;

/// Index of the first token that may hold the identifier.
const FIRST_IDENTIFIER_TOKEN: usize = 3;

/// Number of fields that follow the identifier.
const TRAILING_FIELDS: usize = 5;

/// A single repair heuristic.
pub trait RepairStrategy {
    /// Which strategy this is.
    fn kind(&self) -> Strategy;

    /// Try to recover the nine fields from a normalized line.
    fn repair(&self, line: &str) -> Option<LineFields>;
}

/// Trim the line and drop one trailing comma.
pub fn normalize_line(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed.strip_suffix(',').unwrap_or(trimmed)
}

/// Eight quoted fields where the third one ends with the identifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnchoredTitle;

impl RepairStrategy for AnchoredTitle {
    fn kind(&self) -> Strategy {
        Strategy::AnchoredTitle
    }

    fn repair(&self, line: &str) -> Option<LineFields> {
        let caps = ANCHORED_TITLE_LINE.captures(line)?;
        Some(fields_from_captures(&caps, &caps["title"], &caps["asin"]))
    }
}

/// Eight quoted fields; the identifier is searched inside the third one.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericSplit;

impl RepairStrategy for GenericSplit {
    fn kind(&self) -> Strategy {
        Strategy::GenericSplit
    }

    fn repair(&self, line: &str) -> Option<LineFields> {
        let caps = GENERIC_SPLIT_LINE.captures(line)?;
        let title_asin = caps.name("title_asin")?.as_str();
        let found = find_identifier(title_asin)?;

        Some(fields_from_captures(&caps, &title_asin[..found.start], found.text))
    }
}

/// Quote-aware comma split, then a positional scan for the identifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenScan;

impl RepairStrategy for TokenScan {
    fn kind(&self) -> Strategy {
        Strategy::TokenScan
    }

    fn repair(&self, line: &str) -> Option<LineFields> {
        let tokens: Vec<&str> = split_unquoted_commas(line)
            .into_iter()
            .map(strip_token)
            .collect();

        if tokens.len() < FIELDS_PER_LINE {
            return None;
        }

        let idx = tokens
            .iter()
            .enumerate()
            .skip(FIRST_IDENTIFIER_TOKEN)
            .find(|(_, t)| is_exact_identifier(t))
            .map(|(i, _)| i)?;

        let mut rest: Vec<&str> = tokens[idx + 1..]
            .iter()
            .take(TRAILING_FIELDS)
            .copied()
            .collect();
        rest.resize(TRAILING_FIELDS, "");

        Some(LineFields {
            po: tokens[0].to_string(),
            external_id: tokens[1].to_string(),
            title: sanitize_title(&tokens[2..idx].join(",")),
            asin: tokens[idx].to_string(),
            model: rest[0].to_string(),
            freight_term: rest[1].to_string(),
            qty: clean_numeric(rest[2]),
            unit_cost: clean_numeric(rest[3]),
            amount: clean_numeric(rest[4]),
        })
    }
}

fn fields_from_captures(caps: &Captures<'_>, title: &str, asin: &str) -> LineFields {
    LineFields {
        po: caps["po"].to_string(),
        external_id: caps["external"].to_string(),
        title: sanitize_title(title),
        asin: asin.to_string(),
        model: caps["model"].to_string(),
        freight_term: caps["freight"].to_string(),
        qty: clean_numeric(&caps["qty"]),
        unit_cost: clean_numeric(&caps["unit"]),
        amount: clean_numeric(&caps["amount"]),
    }
}

/// Ordered chain of repair strategies.
pub struct RepairEngine {
    strategies: Vec<Box<dyn RepairStrategy + Send + Sync>>,
}

impl RepairEngine {
    /// Create the engine with the three strategies in their fixed order.
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Box::new(AnchoredTitle),
                Box::new(GenericSplit),
                Box::new(TokenScan),
            ],
        }
    }

    /// Strategies in the order they are tried.
    pub fn order(&self) -> Vec<Strategy> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    /// Run the strategies against a raw line, stopping at the first success.
    pub fn repair(&self, raw: &str) -> Option<(LineFields, Strategy)> {
        let line = normalize_line(raw);

        for strategy in &self.strategies {
            if let Some(fields) = strategy.repair(line) {
                return Some((fields, strategy.kind()));
            }
            trace!("{:?} did not match", strategy.kind());
        }

        None
    }
}

impl Default for RepairEngine {
    fn default() -> Self {
        Self::new()
    }
}
