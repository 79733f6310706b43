//! Indicator identifiers such as `X-FIN-85` or `FW-134`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Uppercase run, dash, optional second uppercase run and dash, digit run.
pub(crate) const IDENTIFIER_PATTERN: &str = r"[A-Z]+-(?:[A-Z]+-)?\d+";

static LEADING_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^\s*({IDENTIFIER_PATTERN})\b")).unwrap());

/// The identifier a paragraph starts with, if any.
///
/// Only the start of the paragraph is considered; identifiers mentioned
/// later in the text do not count.
pub fn leading_identifier(paragraph: &str) -> Option<&str> {
    LEADING_IDENTIFIER
        .captures(paragraph)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Case-insensitive identifier comparison.
pub(crate) fn same_identifier(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_part_identifier() {
        assert_eq!(leading_identifier("X-FIN-85 - Capital investment"), Some("X-FIN-85"));
    }

    #[test]
    fn test_two_part_identifier() {
        assert_eq!(leading_identifier("FW-134 Something"), Some("FW-134"));
        assert_eq!(leading_identifier("FW-134."), Some("FW-134"));
    }

    #[test]
    fn test_leading_whitespace_allowed() {
        assert_eq!(leading_identifier("  FW-134"), Some("FW-134"));
    }

    #[test]
    fn test_not_at_start() {
        assert_eq!(leading_identifier("See X-FIN-85 for details"), None);
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(leading_identifier("x-fin-85"), None);
        assert_eq!(leading_identifier("FW-"), None);
        assert_eq!(leading_identifier("FW-134abc"), None);
        assert_eq!(leading_identifier("FIN85"), None);
    }

    #[test]
    fn test_same_identifier_ignores_case() {
        assert!(same_identifier("x-fin-85", "X-FIN-85"));
        assert!(!same_identifier("X-FIN-85", "X-FIN-86"));
    }
}
