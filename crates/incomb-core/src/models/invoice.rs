//! Invoice line data models.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of fields recovered from a single data line.
pub const FIELDS_PER_LINE: usize = 9;

/// Number of columns in an output row.
pub const COLUMN_COUNT: usize = FIELDS_PER_LINE + 1;

/// Output column names, in row order.
pub const COLUMNS: [&str; COLUMN_COUNT] = [
    "InvoiceNumber",
    "PO",
    "ExternalID",
    "Title",
    "ASIN",
    "Model",
    "FreightTerm",
    "Qty",
    "UnitCost",
    "Amount",
];

/// Which parsing path produced a line's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Standard quoted-CSV tokenization yielded exactly nine fields.
    Strict,
    /// Identifier found at the end of the third quoted field.
    AnchoredTitle,
    /// Identifier searched for inside the captured third field.
    GenericSplit,
    /// Quote-aware comma split with a positional identifier scan.
    TokenScan,
}

impl Strategy {
    /// All strategies, in the order they are tried.
    pub const ALL: [Strategy; 4] = [
        Strategy::Strict,
        Strategy::AnchoredTitle,
        Strategy::GenericSplit,
        Strategy::TokenScan,
    ];

    /// Short human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Strict => "strict",
            Strategy::AnchoredTitle => "anchored-title",
            Strategy::GenericSplit => "generic-split",
            Strategy::TokenScan => "token-scan",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// The nine fields recovered from one data line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineFields {
    pub po: String,
    pub external_id: String,
    pub title: String,
    pub asin: String,
    pub model: String,
    pub freight_term: String,
    pub qty: String,
    pub unit_cost: String,
    pub amount: String,
}

impl LineFields {
    /// Fields in positional order.
    pub fn as_array(&self) -> [&str; FIELDS_PER_LINE] {
        [
            &self.po,
            &self.external_id,
            &self.title,
            &self.asin,
            &self.model,
            &self.freight_term,
            &self.qty,
            &self.unit_cost,
            &self.amount,
        ]
    }

    /// Fields in positional order, as a vector.
    pub fn to_vec(&self) -> Vec<&str> {
        self.as_array().to_vec()
    }
}

/// Outcome of classifying a single data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Fields were recovered by the given strategy.
    Parsed {
        fields: LineFields,
        strategy: Strategy,
    },
    /// No strategy could recover the line.
    Skipped,
}

impl LineOutcome {
    /// Strategy that produced the fields, if any.
    pub fn strategy(&self) -> Option<Strategy> {
        match self {
            LineOutcome::Parsed { strategy, .. } => Some(*strategy),
            LineOutcome::Skipped => None,
        }
    }
}

/// One output record: the invoice number plus a line's nine fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceLine {
    pub invoice_number: String,
    #[serde(rename = "PO")]
    pub po: String,
    #[serde(rename = "ExternalID")]
    pub external_id: String,
    pub title: String,
    #[serde(rename = "ASIN")]
    pub asin: String,
    pub model: String,
    pub freight_term: String,
    pub qty: String,
    pub unit_cost: String,
    pub amount: String,
}

impl InvoiceLine {
    /// Attach an invoice number to recovered line fields.
    pub fn new(invoice_number: impl Into<String>, fields: LineFields) -> Self {
        Self {
            invoice_number: invoice_number.into(),
            po: fields.po,
            external_id: fields.external_id,
            title: fields.title,
            asin: fields.asin,
            model: fields.model,
            freight_term: fields.freight_term,
            qty: fields.qty,
            unit_cost: fields.unit_cost,
            amount: fields.amount,
        }
    }

    /// Row values in [`COLUMNS`] order.
    pub fn as_row(&self) -> [&str; COLUMN_COUNT] {
        [
            &self.invoice_number,
            &self.po,
            &self.external_id,
            &self.title,
            &self.asin,
            &self.model,
            &self.freight_term,
            &self.qty,
            &self.unit_cost,
            &self.amount,
        ]
    }

    /// Quantity as a decimal, if it parses.
    pub fn quantity(&self) -> Option<Decimal> {
        parse_decimal(&self.qty)
    }

    /// Unit cost as a decimal, if it parses.
    pub fn unit_cost(&self) -> Option<Decimal> {
        parse_decimal(&self.unit_cost)
    }

    /// Line amount as a decimal, if it parses.
    pub fn amount(&self) -> Option<Decimal> {
        parse_decimal(&self.amount)
    }
}

/// Coerce a cleaned numeric field. Empty or noisy values yield `None`.
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Decimal::from_str(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_fields() -> LineFields {
        LineFields {
            po: "PO1".into(),
            external_id: "EXT1".into(),
            title: "Widget".into(),
            asin: "B000123ABC".into(),
            model: "M1".into(),
            freight_term: "Prepaid".into(),
            qty: "5".into(),
            unit_cost: "10.00".into(),
            amount: "-50.00".into(),
        }
    }

    #[test]
    fn test_invoice_line_row_order() {
        let line = InvoiceLine::new("123456", sample_fields());

        assert_eq!(
            line.as_row(),
            ["123456", "PO1", "EXT1", "Widget", "B000123ABC", "M1", "Prepaid", "5", "10.00", "-50.00"]
        );
        assert_eq!(line.as_row().len(), COLUMNS.len());
    }

    #[test]
    fn test_invoice_line_serializes_with_column_names() {
        let line = InvoiceLine::new("123456", sample_fields());
        let json = serde_json::to_value(&line).unwrap();
        let object = json.as_object().unwrap();

        for column in COLUMNS {
            assert!(object.contains_key(column), "missing {column}");
        }
        assert_eq!(object.len(), COLUMN_COUNT);
    }

    #[test]
    fn test_numeric_coercion() {
        let line = InvoiceLine::new("", sample_fields());

        assert_eq!(line.quantity(), Some(Decimal::from(5)));
        assert_eq!(line.unit_cost(), Decimal::from_str("10.00").ok());
        assert_eq!(line.amount(), Decimal::from_str("-50.00").ok());
    }

    #[test]
    fn test_numeric_coercion_rejects_noise() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("12 units"), None);
        assert_eq!(parse_decimal("n/a"), None);
    }

    #[test]
    fn test_strategy_labels() {
        assert_eq!(Strategy::Strict.to_string(), "strict");
        assert_eq!(Strategy::ALL.len(), 4);
    }
}
