//! Text normalization and token similarity.

use std::collections::HashSet;

/// Tokens this short or shorter carry no signal.
const MIN_TOKEN_CHARS: usize = 3;

/// Canonicalize free text for comparison.
///
/// Lowercases, folds typographic quotes and dashes, replaces everything other
/// than alphanumerics, `_`, `-`, `'` and whitespace with a space, then
/// collapses whitespace. Applying it twice gives the same result as once.
#[must_use]
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{2010}'..='\u{2014}' | '\u{2212}' => '-',
            c if c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '-' | '\'') => c,
            _ => ' ',
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace tokens longer than two characters.
pub fn significant_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
}

/// Jaccard index of the significant-token sets of `a` and `b`.
///
/// Returns `0.0` when either side has no significant tokens.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let left: HashSet<&str> = significant_tokens(a).collect();
    let right: HashSet<&str> = significant_tokens(b).collect();

    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let intersection = left.intersection(&right).count();
    let union = left.union(&right).count();

    #[allow(clippy::cast_precision_loss)]
    let ratio = intersection as f64 / union as f64;
    ratio
}
