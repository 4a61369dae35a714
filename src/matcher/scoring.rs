//! Weighted field scoring over the Q&A corpus.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use super::normalize::{normalize, similarity};
use super::semantic::semantic_match;
use crate::config::MatcherConfig;
use crate::knowledge::QaEntry;

/// Intent key of the entry returned when nothing scores high enough.
pub const OUT_OF_SCOPE_INTENT: &str = "out_of_scope";

const CANONICAL_WEIGHT: f64 = 15.0;
const VARIANT_WEIGHT: f64 = 12.0;
const TAG_POINTS: u32 = 6;
const INDUSTRY_POINTS: u32 = 4;
const MULTI_FIELD_POINTS: u32 = 2;
const CONFIDENCE_WEIGHT: f64 = 5.0;

/// Which part of an entry contributed to its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchedField {
    Canonical,
    Variants,
    Tags,
    Industries,
    /// Reached through the concept-expansion pass.
    Semantic,
    /// The out-of-scope entry returned as a catch-all.
    OutOfScope,
}

impl fmt::Display for MatchedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Canonical => "canonical",
            Self::Variants => "variants",
            Self::Tags => "tags",
            Self::Industries => "industries",
            Self::Semantic => "semantic",
            Self::OutOfScope => "out_of_scope",
        };
        f.write_str(name)
    }
}

/// The entry chosen for a query, with how it scored.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub entry: &'a QaEntry,
    pub score: u32,
    pub matched_fields: Vec<MatchedField>,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn weighted(value: f64, weight: f64) -> u32 {
    (value * weight).round().max(0.0) as u32
}

fn as_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn contains_either_way(query: &str, term: &str) -> bool {
    !term.is_empty() && (query.contains(term) || term.contains(query))
}

/// Score one entry against an already-normalized query.
#[must_use]
pub fn score_entry(
    query: &str,
    entry: &QaEntry,
    config: &MatcherConfig,
) -> (u32, Vec<MatchedField>) {
    let mut score = 0;
    let mut fields = Vec::new();

    let canonical = similarity(query, &normalize(&entry.canonical_question));
    if canonical > config.canonical_min_similarity {
        score += weighted(canonical, CANONICAL_WEIGHT);
        fields.push(MatchedField::Canonical);
    }

    let best_variant = entry
        .variants
        .iter()
        .map(|v| similarity(query, &normalize(v)))
        .fold(0.0_f64, f64::max);
    if best_variant > config.variant_min_similarity {
        score += weighted(best_variant, VARIANT_WEIGHT);
        fields.push(MatchedField::Variants);
    }

    let tag_hits = entry
        .tags
        .iter()
        .filter(|t| contains_either_way(query, &normalize(t)))
        .count();
    if tag_hits > 0 {
        score += TAG_POINTS.saturating_mul(as_count(tag_hits));
        fields.push(MatchedField::Tags);
    }

    let industry_hits = entry
        .industries
        .iter()
        .filter(|i| contains_either_way(query, &normalize(i)))
        .count();
    if industry_hits > 0 {
        score += INDUSTRY_POINTS.saturating_mul(as_count(industry_hits));
        fields.push(MatchedField::Industries);
    }

    if fields.len() > 1 {
        score += MULTI_FIELD_POINTS * as_count(fields.len());
    }

    score += weighted(entry.confidence, CONFIDENCE_WEIGHT);

    (score, fields)
}

/// Find the best Q&A entry for `query`.
///
/// Direct scoring first, then the out-of-scope catch-all, then the semantic
/// pass. `None` means nothing in the corpus is relevant.
#[must_use]
pub fn match_query<'a>(
    query: &str,
    corpus: &'a [QaEntry],
    config: &MatcherConfig,
) -> Option<MatchResult<'a>> {
    if query.trim().is_empty() {
        return None;
    }

    let normalized = normalize(query);
    if normalized.is_empty() {
        return None;
    }

    let mut accepted: Vec<MatchResult<'a>> = corpus
        .iter()
        .filter_map(|entry| {
            let (score, matched_fields) = score_entry(&normalized, entry, config);
            (score > config.acceptance_threshold).then_some(MatchResult {
                entry,
                score,
                matched_fields,
            })
        })
        .collect();

    // Stable sort keeps corpus order for full ties.
    accepted.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| {
                b.entry
                    .confidence
                    .partial_cmp(&a.entry.confidence)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| b.matched_fields.len().cmp(&a.matched_fields.len()))
    });

    if let Some(best) = accepted.into_iter().next() {
        tracing::debug!(
            intent = %best.entry.intent_key,
            score = best.score,
            "Direct match"
        );
        return Some(best);
    }

    if let Some(entry) = corpus.iter().find(|e| e.intent_key == OUT_OF_SCOPE_INTENT) {
        tracing::debug!("No direct match, returning out-of-scope entry");
        return Some(MatchResult {
            entry,
            score: 0,
            matched_fields: vec![MatchedField::OutOfScope],
        });
    }

    semantic_match(&normalized, corpus, config.semantic_threshold)
}
