//! Text normalization applied before vectorization.

use regex::Regex;
use std::sync::OnceLock;

static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();
static DISALLOWED_RE: OnceLock<Regex> = OnceLock::new();

fn whitespace_re() -> &'static Regex {
    WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn disallowed_re() -> &'static Regex {
    DISALLOWED_RE.get_or_init(|| Regex::new(r"[^a-z0-9\s]").unwrap())
}

/// Normalize email text for the vectorizer.
///
/// Lower-cases, collapses whitespace runs to a single space, drops anything
/// outside `[a-z0-9\s]` (punctuation, accents, non-ASCII letters) and trims.
/// Whitespace is collapsed again after the strip so that removed characters
/// never leave a double space behind; this keeps the function idempotent.
///
/// `None` stands in for a missing or non-text value and yields `""`.
pub fn clean_text(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let lowered = text.to_lowercase();
    let collapsed = whitespace_re().replace_all(&lowered, " ");
    let stripped = disallowed_re().replace_all(&collapsed, "");
    let recollapsed = whitespace_re().replace_all(&stripped, " ");
    recollapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_basic_cleaning() {
        assert_eq!(clean_text(Some("Hello,   World! 123")), "hello world 123");
    }

    #[test]
    fn test_missing_input_is_empty() {
        assert_eq!(clean_text(None), "");
        assert_eq!(clean_text(Some("")), "");
        assert_eq!(clean_text(Some(" \t\n ")), "");
    }

    #[test]
    fn test_strips_accents_and_non_ascii() {
        assert_eq!(clean_text(Some("Café Übersicht")), "caf bersicht");
        assert_eq!(clean_text(Some("日本 report")), "report");
    }

    #[test]
    fn test_newlines_and_tabs_collapse() {
        assert_eq!(
            clean_text(Some("Dear team,\n\n\tPlease find\r\nattached.")),
            "dear team please find attached"
        );
    }

    #[test]
    fn test_removed_punctuation_leaves_single_space() {
        assert_eq!(clean_text(Some("form 16 : A")), "form 16 a");
        assert_eq!(clean_text(Some("tds's")), "tdss");
    }

    proptest! {
        #[test]
        fn prop_idempotent(s in "\\PC*") {
            let once = clean_text(Some(&s));
            let twice = clean_text(Some(&once));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_output_alphabet(s in "\\PC*") {
            let out = clean_text(Some(&s));
            prop_assert!(out.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
            prop_assert!(!out.contains("  "));
            prop_assert_eq!(out.trim(), out.as_str());
        }
    }
}
