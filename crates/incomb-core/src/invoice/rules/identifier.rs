//! Product identifier (ASIN) matching.
//!
//! Every strategy anchors the title/rest split on this matcher, so the
//! identifier shape is defined in exactly one place.

use super::patterns::{IDENTIFIER_ANYWHERE, IDENTIFIER_EXACT};

/// A located identifier inside a larger text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierMatch<'a> {
    /// Byte offset where the identifier starts.
    pub start: usize,
    /// Byte offset just past the identifier.
    pub end: usize,
    /// The identifier itself.
    pub text: &'a str,
}

/// Whether `text` is exactly one identifier and nothing else.
pub fn is_exact_identifier(text: &str) -> bool {
    IDENTIFIER_EXACT.is_match(text)
}

/// Find the first identifier inside `text`.
pub fn find_identifier(text: &str) -> Option<IdentifierMatch<'_>> {
    IDENTIFIER_ANYWHERE.find(text).map(|m| IdentifierMatch {
        start: m.start(),
        end: m.end(),
        text: m.as_str(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_exact_identifier() {
        assert!(is_exact_identifier("B000123ABC"));
        assert!(is_exact_identifier("0123456789"));
        assert!(!is_exact_identifier("B000123AB"));
        assert!(!is_exact_identifier("B000123ABCD"));
        assert!(!is_exact_identifier("b000123abc"));
        assert!(!is_exact_identifier(" B000123ABC"));
    }

    #[test]
    fn test_find_identifier_position() {
        let found = find_identifier("Widget B000456DEF tail").unwrap();
        assert_eq!(found.start, 7);
        assert_eq!(found.end, 17);
        assert_eq!(found.text, "B000456DEF");
    }

    #[test]
    fn test_find_identifier_inside_longer_run() {
        let found = find_identifier("xxABCDEFGHIJKLMN").unwrap();
        assert_eq!(found.start, 2);
        assert_eq!(found.text, "ABCDEFGHIJ");
    }

    #[test]
    fn test_find_identifier_none() {
        assert_eq!(find_identifier("short ABC123 lower abcdefghij"), None);
    }
}
