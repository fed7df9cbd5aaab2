//! Accent- and case-insensitive text folding for product name matching.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold `input` for fuzzy comparison.
///
/// Decomposes to NFD, drops every combining mark and lower-cases what is
/// left, so `"Mousé Óptico"` becomes `"mouse optico"`.
pub fn normalize(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Whether `name` contains `term` once both are normalised.
pub fn matches(name: &str, term: &str) -> bool {
    normalize(name).contains(&normalize(term))
}
