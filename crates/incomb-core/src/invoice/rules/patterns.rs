//! Common regex patterns for invoice-detail line recovery.

use lazy_static::lazy_static;
use regex::Regex;

/// Product identifier shape: 10 uppercase letters or digits.
pub const IDENTIFIER: &str = r"[A-Z0-9]{10}";

lazy_static! {
    // Product identifier anywhere in text (not word-boundary anchored)
    pub static ref IDENTIFIER_ANYWHERE: Regex = Regex::new(IDENTIFIER).unwrap();

    pub static ref IDENTIFIER_EXACT: Regex = Regex::new(
        &format!(r"^{IDENTIFIER}$")
    ).unwrap();

    // Eight quoted fields, the third ending with the identifier
    pub static ref ANCHORED_TITLE_LINE: Regex = Regex::new(
        &format!(
            concat!(
                r#"(?s)^"(?P<po>[^"]*)","#,
                r#""(?P<external>[^"]*)","#,
                r#""(?P<title>.*?)"#,
                r#"(?P<asin>{})","#,
                r#""(?P<model>[^"]*)","#,
                r#""(?P<freight>[^"]*)","#,
                r#""(?P<qty>[^"]*)","#,
                r#""(?P<unit>[^"]*)","#,
                r#""(?P<amount>[^"]*)"$"#,
            ),
            IDENTIFIER
        )
    ).unwrap();

    // Eight quoted fields, the third captured whole
    pub static ref GENERIC_SPLIT_LINE: Regex = Regex::new(
        concat!(
            r#"(?s)^"(?P<po>[^"]*)","#,
            r#""(?P<external>[^"]*)","#,
            r#""(?P<title_asin>.*?)","#,
            r#""(?P<model>[^"]*)","#,
            r#""(?P<freight>[^"]*)","#,
            r#""(?P<qty>[^"]*)","#,
            r#""(?P<unit>[^"]*)","#,
            r#""(?P<amount>[^"]*)"$"#,
        )
    ).unwrap();
}
