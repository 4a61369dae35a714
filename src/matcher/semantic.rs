//! Concept-expansion fallback for queries the direct scorer misses.

use std::collections::BTreeSet;

use super::normalize::significant_tokens;
use super::scoring::{MatchResult, MatchedField};
use crate::knowledge::QaEntry;

/// Concept keys and the terms they pull into a query.
const CONCEPTS: &[(&str, &[&str])] = &[
    ("design", &["design", "designing", "designer", "designs"]),
    ("system", &["system", "systems", "systematic", "systemic"]),
    (
        "experience",
        &["experience", "experienced", "expertise", "background", "work"],
    ),
    (
        "build",
        &["build", "building", "built", "create", "creating", "developed"],
    ),
    (
        "manage",
        &["manage", "managing", "managed", "lead", "leading", "led"],
    ),
    (
        "platform",
        &["platform", "platforms", "software", "application", "app"],
    ),
    (
        "user",
        &["user", "users", "user experience", "ux", "usability"],
    ),
    (
        "research",
        &["research", "researcher", "studying", "analysis", "analyze"],
    ),
    (
        "prototype",
        &["prototype", "prototyping", "wireframe", "mockup"],
    ),
    (
        "test",
        &["test", "testing", "validate", "validation", "usability test"],
    ),
];

const CONCEPT_POINTS: f64 = 3.0;
const KEYWORD_POINTS: f64 = 2.0;
const CONCEPT_WEIGHT: f64 = 0.7;
const KEYWORD_WEIGHT: f64 = 0.3;
/// Candidates at or below this never count.
const CANDIDATE_FLOOR: f64 = 2.0;

/// The normalized query plus the related terms of every concept it mentions.
#[must_use]
pub fn expand_terms(normalized: &str) -> BTreeSet<String> {
    let mut terms = BTreeSet::new();
    terms.insert(normalized.to_string());
    for (concept, related) in CONCEPTS {
        if normalized.contains(concept) {
            terms.extend(related.iter().map(|t| (*t).to_string()));
        }
    }
    terms
}

fn entry_text(entry: &QaEntry) -> String {
    std::iter::once(&entry.canonical_question)
        .chain(&entry.variants)
        .chain(&entry.tags)
        .chain(&entry.industries)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn combined_score(text: &str, terms: &BTreeSet<String>, normalized: &str) -> f64 {
    let concept_hits = terms.iter().filter(|t| text.contains(t.as_str())).count();
    let keyword_hits = significant_tokens(normalized)
        .filter(|t| text.contains(t))
        .count();

    #[allow(clippy::cast_precision_loss)]
    let (concept, keyword) = (
        concept_hits as f64 * CONCEPT_POINTS,
        keyword_hits as f64 * KEYWORD_POINTS,
    );
    concept * CONCEPT_WEIGHT + keyword * KEYWORD_WEIGHT
}

/// Best entry by concept overlap, accepted only above `threshold`.
#[must_use]
pub fn semantic_match<'a>(
    normalized: &str,
    corpus: &'a [QaEntry],
    threshold: f64,
) -> Option<MatchResult<'a>> {
    let terms = expand_terms(normalized);

    let mut best: Option<(&'a QaEntry, f64)> = None;
    for entry in corpus {
        let score = combined_score(&entry_text(entry), &terms, normalized);
        if score <= CANDIDATE_FLOOR {
            continue;
        }
        // Strict comparison keeps the first of equal candidates.
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((entry, score));
        }
    }

    let (entry, score) = best?;
    if score <= threshold {
        tracing::debug!(intent = %entry.intent_key, score, "Semantic candidate below threshold");
        return None;
    }

    tracing::debug!(intent = %entry.intent_key, score, "Semantic match");
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = score.round() as u32;
    Some(MatchResult {
        entry,
        score: rounded,
        matched_fields: vec![MatchedField::Semantic],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, canonical: &str, tags: &[&str]) -> QaEntry {
        QaEntry {
            intent_key: key.to_string(),
            canonical_question: canonical.to_string(),
            variants: Vec::new(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            industries: Vec::new(),
            answer: String::new(),
            confidence: 0.0,
        }
    }

    #[test]
    fn test_expand_terms() {
        let terms = expand_terms("prototype testing");
        assert!(terms.contains("prototype testing"));
        assert!(terms.contains("wireframe"));
        assert!(terms.contains("usability test"));
        assert!(!terms.contains("designer"));
    }

    #[test]
    fn test_semantic_match_accepts_concept_overlap() {
        let corpus = vec![
            entry("unrelated", "What about fintech?", &["banking"]),
            entry(
                "skills_design_tools",
                "Which prototyping tools does Jon use?",
                &["prototype", "wireframe", "mockup"],
            ),
        ];
        // terms: "prototype", "prototyping", "wireframe", "mockup" hit (4 * 3 = 12)
        // keyword: "prototype" hits (2); combined 0.7*12 + 0.3*2 = 9.0
        let result = semantic_match("prototype", &corpus, 8.0).unwrap();
        assert_eq!(result.entry.intent_key, "skills_design_tools");
        assert_eq!(result.matched_fields, vec![MatchedField::Semantic]);
        assert_eq!(result.score, 9);
    }

    #[test]
    fn test_semantic_match_below_threshold() {
        let corpus = vec![entry("k", "Something about design", &[])];
        // only "design" hits (3) plus the keyword (2): 0.7*3 + 0.3*2 = 2.7
        assert!(semantic_match("design", &corpus, 8.0).is_none());
    }

    #[test]
    fn test_semantic_match_first_of_equals_wins() {
        let corpus = vec![
            entry("a", "prototype wireframe mockup prototyping", &[]),
            entry("b", "prototype wireframe mockup prototyping", &[]),
        ];
        let result = semantic_match("prototype", &corpus, 8.0).unwrap();
        assert_eq!(result.entry.intent_key, "a");
    }
}
