//! Value sanitizing for recovered fields.

/// Characters stripped from the end of a title besides whitespace.
const TITLE_TRAILING: [char; 4] = [',', '"', '\u{201c}', '\u{201d}'];

/// Clean a free-text title.
///
/// Surrounding whitespace is trimmed, then any trailing run of whitespace,
/// commas and straight or curly double quotes is removed. Leading characters
/// are never touched beyond whitespace.
pub fn sanitize_title(text: &str) -> String {
    text.trim()
        .trim_end_matches(|c: char| c.is_whitespace() || TITLE_TRAILING.contains(&c))
        .to_string()
}

/// Clean an optional title, mapping `None` to an empty string.
pub fn sanitize_optional_title(text: Option<&str>) -> String {
    text.map(sanitize_title).unwrap_or_default()
}

/// Strip currency symbols and thousands separators from a numeric field.
///
/// The result stays a string; it is not guaranteed to parse as a number.
pub fn clean_numeric(text: &str) -> String {
    text.replace(['$', ','], "").trim().to_string()
}

/// Clean an optional numeric field, mapping `None` to an empty string.
pub fn clean_optional_numeric(text: Option<&str>) -> String {
    text.map(clean_numeric).unwrap_or_default()
}

/// Trim whitespace and surrounding double quotes from a raw token.
pub fn strip_token(token: &str) -> &str {
    token.trim().trim_matches('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_title_trailing_artifacts() {
        assert_eq!(sanitize_title("  Widget, Deluxe Edition , \"\" "), "Widget, Deluxe Edition");
        assert_eq!(sanitize_title("Gadget \u{201c}Pro\u{201d}\u{201d},"), "Gadget \u{201c}Pro");
        assert_eq!(sanitize_title("\"Quoted start"), "\"Quoted start");
        assert_eq!(sanitize_title(",,, \""), "");
    }

    #[test]
    fn test_sanitize_title_idempotent() {
        let inputs = [
            "Widget",
            "Widget ,\t,",
            "  a, b, c,,,\"\"\"   ",
            "Mixed \u{201d} , \" \t",
            "",
        ];

        for input in inputs {
            let once = sanitize_title(input);
            assert_eq!(sanitize_title(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_sanitize_optional_title() {
        assert_eq!(sanitize_optional_title(None), "");
        assert_eq!(sanitize_optional_title(Some("x, ")), "x");
    }

    #[test]
    fn test_clean_numeric() {
        assert_eq!(clean_numeric("1,000"), "1000");
        assert_eq!(clean_numeric("$5.50"), "5.50");
        assert_eq!(clean_numeric(" $5,500.00 "), "5500.00");
        assert_eq!(clean_numeric("-$1,234.5"), "-1234.5");
        assert_eq!(clean_numeric("n/a"), "n/a");
        assert_eq!(clean_optional_numeric(None), "");
    }

    #[test]
    fn test_strip_token() {
        assert_eq!(strip_token("  \"PO1\" "), "PO1");
        assert_eq!(strip_token("\"\"nested\"\""), "nested");
    }
}
