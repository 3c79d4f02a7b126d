//! Fuzzy text matching — typo-tolerant pass/fail filter for job search.
//!
//! The default `fuzzy_match` reproduces the behavior the job-listing filter
//! has always had: every query word is compared (via its suffix variants)
//! against the *whole* text field, not against individual tokens. The longer
//! the field, the lower the normalized similarity of any short variant, so
//! on descriptions the distance path effectively never fires and only
//! substring hits match. `fuzzy_match_tokenized` is the corrected per-token
//! comparison, selectable via `FUZZY_TOKENIZED` (see `search::matcher`).

/// Similarity cutoff used when a caller does not supply one.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Levenshtein edit distance between two strings, computed over `char`s.
///
/// Classic DP, kept to two rows so space is O(min(len)) rather than the
/// full matrix.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Normalized similarity in [0, 1]: `1 - distance / max(len_a, len_b)`.
pub(crate) fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    1.0 - levenshtein_distance(a, b) as f64 / max_len as f64
}

/// Suffix variants tried for each query word: the word itself, the `-ing`/
/// `-er` stem swaps, and the plural/singular toggle. Checks are independent,
/// so a word like `boxer` yields `[boxer, box, boxing, boxers]`.
pub(crate) fn word_variants(word: &str) -> Vec<String> {
    let mut variants = vec![word.to_string()];

    if let Some(stem) = word.strip_suffix("ing") {
        variants.push(stem.to_string());
        variants.push(format!("{stem}er"));
    }

    if let Some(stem) = word.strip_suffix("er") {
        variants.push(stem.to_string());
        variants.push(format!("{stem}ing"));
    }

    match word.strip_suffix('s') {
        Some(stem) => variants.push(stem.to_string()),
        None => variants.push(format!("{word}s")),
    }

    variants
}

/// Decides whether `query` approximately matches `text`.
///
/// - Empty query matches everything; empty text matches nothing.
/// - A case-insensitive substring hit short-circuits to `true`.
/// - Otherwise every whitespace-separated query word must match (AND),
///   where a word matches if any of its variants clears `threshold`
///   similarity against the full lowercased text (OR).
///
/// Total over all inputs; never panics, never errors.
pub fn fuzzy_match(text: &str, query: &str, threshold: f64) -> bool {
    if query.is_empty() {
        return true;
    }
    if text.is_empty() {
        return false;
    }

    let text = text.to_lowercase();
    let query = query.to_lowercase();

    if text.contains(&query) {
        return true;
    }

    query.split_whitespace().all(|word| {
        word_variants(word)
            .iter()
            .any(|variant| similarity(variant, &text) > threshold)
    })
}

/// Corrected matcher: variants are compared against each whitespace token of
/// the text instead of the whole field, so long descriptions no longer match
/// everything. Same empty/substring rules as [`fuzzy_match`].
pub fn fuzzy_match_tokenized(text: &str, query: &str, threshold: f64) -> bool {
    if query.is_empty() {
        return true;
    }
    if text.is_empty() {
        return false;
    }

    let text = text.to_lowercase();
    let query = query.to_lowercase();

    if text.contains(&query) {
        return true;
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();

    query.split_whitespace().all(|word| {
        word_variants(word).iter().any(|variant| {
            tokens
                .iter()
                .any(|token| similarity(variant, token) > threshold)
        })
    })
}
