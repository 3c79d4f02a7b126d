//! Pluggable match backends for job search.
//!
//! `AppState` holds an `Arc<dyn JobMatcher>`, swapped at startup via the
//! `FUZZY_TOKENIZED` config flag. The whole-text backend is the compatible
//! default; the tokenized backend is the corrected behavior for long fields
//! (see the quirk note in `search::fuzzy`).

use std::sync::Arc;

use crate::search::fuzzy::{fuzzy_match, fuzzy_match_tokenized};

/// A boolean text-match decision per (field, query) pair. Implementations
/// must be pure and thread-safe; they are called concurrently from handlers.
pub trait JobMatcher: Send + Sync {
    /// Backend label surfaced in search responses for transparency.
    fn backend(&self) -> &'static str;

    fn matches(&self, text: &str, query: &str, threshold: f64) -> bool;
}

/// Compatible default: each query-word variant is compared against the
/// entire text field.
pub struct WholeTextMatcher;

impl JobMatcher for WholeTextMatcher {
    fn backend(&self) -> &'static str {
        "whole-text"
    }

    fn matches(&self, text: &str, query: &str, threshold: f64) -> bool {
        fuzzy_match(text, query, threshold)
    }
}

/// Corrected backend: variants are compared per whitespace token of the text.
pub struct TokenizedMatcher;

impl JobMatcher for TokenizedMatcher {
    fn backend(&self) -> &'static str {
        "tokenized"
    }

    fn matches(&self, text: &str, query: &str, threshold: f64) -> bool {
        fuzzy_match_tokenized(text, query, threshold)
    }
}

/// Selects the matcher backend from config.
pub fn matcher_from_config(tokenized: bool) -> Arc<dyn JobMatcher> {
    if tokenized {
        Arc::new(TokenizedMatcher)
    } else {
        Arc::new(WholeTextMatcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_labels() {
        assert_eq!(WholeTextMatcher.backend(), "whole-text");
        assert_eq!(TokenizedMatcher.backend(), "tokenized");
    }

    #[test]
    fn test_config_flag_selects_backend() {
        assert_eq!(matcher_from_config(false).backend(), "whole-text");
        assert_eq!(matcher_from_config(true).backend(), "tokenized");
    }

    #[test]
    fn test_both_backends_agree_on_substring() {
        for matcher in [&WholeTextMatcher as &dyn JobMatcher, &TokenizedMatcher] {
            assert!(matcher.matches("Senior Rust Engineer", "rust", 0.3));
            assert!(matcher.matches("anything", "", 0.3));
            assert!(!matcher.matches("", "rust", 0.3));
        }
    }
}
