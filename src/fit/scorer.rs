//! Job-description scoring.

use serde::Serialize;

use super::notes::{RoleGroup, DEFAULT_HIGHLIGHTS};
use super::profile::CandidateProfile;
use super::rules::{RoleFitTable, MAX_FIT_SCORE};
use super::tier::FitTier;

const SKILL_POINTS: u32 = 10;
const DOMAIN_POINTS: u32 = 15;
const ROLE_POINTS: u32 = 20;
const SENIORITY_POINTS: u32 = 25;
const CORE_POINTS: u32 = 30;
const INDUSTRY_POINTS: u32 = 15;

/// Where a fit score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitSource {
    /// A fixed-score role rule.
    Rule,
    /// The additive keyword heuristic.
    Heuristic,
    /// A generative model's analysis.
    Ai,
}

/// Result of scoring a job description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FitReport {
    /// 0..=97.
    pub score: u8,
    pub tier: FitTier,
    pub source: FitSource,
    /// Keyword of the rule that decided the score.
    pub matched_rule: Option<String>,
    pub matched_skills: Vec<String>,
    pub matched_domains: Vec<String>,
    pub matched_roles: Vec<String>,
    pub title: String,
    pub subtitle: String,
    pub summary: String,
    /// Role-family explanation, when one applies.
    pub note: Option<String>,
}

impl FitReport {
    fn with_score(score: u8, source: FitSource, name: &str) -> Self {
        let score = score.min(MAX_FIT_SCORE);
        let tier = FitTier::from_score(score);
        Self {
            score,
            tier,
            source,
            matched_rule: None,
            matched_skills: Vec::new(),
            matched_domains: Vec::new(),
            matched_roles: Vec::new(),
            title: tier.title().to_string(),
            subtitle: tier.subtitle(name),
            summary: tier.summary(name),
            note: None,
        }
    }

    /// Wrap a model's analysis. The score is clamped like any other.
    #[must_use]
    pub fn from_analysis(
        score: u8,
        strengths: Vec<String>,
        explanation: Option<String>,
        name: &str,
    ) -> Self {
        Self {
            matched_skills: strengths,
            note: explanation.filter(|e| !e.trim().is_empty()),
            ..Self::with_score(score, FitSource::Ai, name)
        }
    }
}

fn hits(list: &[String], text: &str) -> Vec<String> {
    list.iter()
        .filter(|k| !k.is_empty() && text.contains(k.as_str()))
        .cloned()
        .collect()
}

/// The first three words of `text`, as a phrase.
fn lead_phrase(text: &str) -> String {
    text.split_whitespace().take(3).collect::<Vec<_>>().join(" ")
}

fn points(per_hit: u32, count: usize) -> u32 {
    per_hit.saturating_mul(u32::try_from(count).unwrap_or(u32::MAX))
}

/// Score `job_text` against the rule table, falling back to the heuristic.
///
/// The first matching rule decides the score. Without one, the score is the
/// sum of keyword bonuses over `profile`, clamped to `0..=97`.
#[must_use]
pub fn score_fit(job_text: &str, rules: &RoleFitTable, profile: &CandidateProfile) -> FitReport {
    if let Some(rule) = rules.first_match(job_text) {
        tracing::debug!(rule = rule.keyword(), score = rule.score(), "Role rule matched");
        let group = RoleGroup::for_keyword(rule.keyword());
        let highlights = group.map_or(DEFAULT_HIGHLIGHTS, RoleGroup::highlights);
        return FitReport {
            matched_rule: Some(rule.keyword().to_string()),
            matched_skills: highlights.iter().map(|s| (*s).to_string()).collect(),
            note: group.map(|g| g.note(&profile.name)),
            ..FitReport::with_score(rule.score(), FitSource::Rule, &profile.name)
        };
    }

    let text = job_text.to_lowercase();

    let matched_skills = hits(&profile.skills, &text);

    // Every project whose domain is named scores, even when domains repeat.
    let domain_hits = hits(&profile.domains, &text);
    let mut matched_domains: Vec<String> = Vec::new();
    for domain in &domain_hits {
        if !matched_domains.contains(domain) {
            matched_domains.push(domain.clone());
        }
    }

    let lead = lead_phrase(&text);
    let matched_roles: Vec<String> = profile
        .prior_roles
        .iter()
        .filter(|role| {
            (!role.name.is_empty() && text.contains(role.name.as_str()))
                || role.titles.iter().any(|t| text.contains(t.as_str()))
                || (!lead.is_empty() && role.summary.contains(lead.as_str()))
        })
        .map(|role| role.name.clone())
        .collect();

    let mut total = points(SKILL_POINTS, matched_skills.len())
        + points(DOMAIN_POINTS, domain_hits.len())
        + points(ROLE_POINTS, matched_roles.len());
    if !hits(&profile.seniority_keywords, &text).is_empty() {
        total += SENIORITY_POINTS;
    }
    if !hits(&profile.core_keywords, &text).is_empty() {
        total += CORE_POINTS;
    }
    if !hits(&profile.industries, &text).is_empty() {
        total += INDUSTRY_POINTS;
    }

    let score = u8::try_from(total.min(u32::from(MAX_FIT_SCORE))).unwrap_or(MAX_FIT_SCORE);
    tracing::debug!(
        total,
        score,
        skills = matched_skills.len(),
        domains = domain_hits.len(),
        roles = matched_roles.len(),
        "Heuristic fit"
    );

    FitReport {
        matched_skills,
        matched_domains,
        matched_roles,
        ..FitReport::with_score(score, FitSource::Heuristic, &profile.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::{PriorRole, RoleFitRule};

    fn profile() -> CandidateProfile {
        CandidateProfile {
            name: "Jon".to_string(),
            skills: vec!["figma".to_string(), "design systems".to_string()],
            domains: vec!["healthcare".to_string()],
            prior_roles: vec![PriorRole {
                name: "zara".to_string(),
                titles: vec!["senior ux designer".to_string()],
                summary: "in-store tools for retail staff".to_string(),
            }],
            industries: vec!["saas".to_string(), "healthcare".to_string()],
            seniority_keywords: vec!["senior".to_string(), "lead".to_string()],
            core_keywords: vec!["ux".to_string(), "design".to_string()],
        }
    }

    #[test]
    fn test_rule_beats_heuristic() {
        let report = score_fit(
            "Senior UX Designer",
            &RoleFitTable::with_default_rules(),
            &profile(),
        );
        assert_eq!(report.score, 94);
        assert_eq!(report.source, FitSource::Rule);
        assert_eq!(report.matched_rule.as_deref(), Some("senior ux designer"));
        assert_eq!(report.tier, FitTier::Excellent);
        assert!(report.note.is_none());
    }

    #[test]
    fn test_rule_note_for_role_family() {
        let report = score_fit(
            "Creative Developer, Berlin",
            &RoleFitTable::with_default_rules(),
            &profile(),
        );
        assert_eq!(report.score, 88);
        assert!(report.note.unwrap().starts_with("Jon holds a degree"));
        assert!(report.matched_skills.contains(&"Frontend Development".to_string()));
    }

    #[test]
    fn test_heuristic_sum() {
        let report = score_fit("Healthcare figma wizard", &RoleFitTable::new(), &profile());
        // skill 10 + domain 15 + industry 15
        assert_eq!(report.score, 40);
        assert_eq!(report.source, FitSource::Heuristic);
        assert_eq!(report.matched_skills, vec!["figma"]);
        assert_eq!(report.matched_domains, vec!["healthcare"]);
        assert_eq!(report.tier, FitTier::Partial);
    }

    #[test]
    fn test_domain_counts_per_project() {
        let mut profile = profile();
        profile.domains = vec!["healthcare".to_string(), "healthcare".to_string()];
        let report = score_fit("Healthcare", &RoleFitTable::new(), &profile);
        // two projects 30 + industry 15
        assert_eq!(report.score, 45);
        assert_eq!(report.matched_domains, vec!["healthcare"]);
    }

    #[test]
    fn test_role_summary_matches_lead_phrase() {
        let report = score_fit(
            "In-store tools for a grocery chain",
            &RoleFitTable::new(),
            &profile(),
        );
        assert_eq!(report.matched_roles, vec!["zara"]);
        assert_eq!(report.score, 20);

        let report = score_fit("Tools for in-store staff", &RoleFitTable::new(), &profile());
        assert!(report.matched_roles.is_empty());
    }

    #[test]
    fn test_lead_phrase() {
        assert_eq!(lead_phrase("  In-store  tools for a chain"), "In-store tools for");
        assert_eq!(lead_phrase("solo"), "solo");
        assert_eq!(lead_phrase(""), "");
    }

    #[test]
    fn test_heuristic_clamped() {
        let report = score_fit(
            "Senior UX design systems lead at ZARA for healthcare SaaS, figma daily",
            &RoleFitTable::new(),
            &profile(),
        );
        assert_eq!(report.score, MAX_FIT_SCORE);
        assert_eq!(report.matched_roles, vec!["zara"]);
    }

    #[test]
    fn test_heuristic_zero_floor() {
        let report = score_fit(
            "Marketing Manager at a Fashion Brand",
            &RoleFitTable::with_default_rules(),
            &profile(),
        );
        assert_eq!(report.score, 0);
        assert_eq!(report.tier, FitTier::Low);
        assert!(report.matched_rule.is_none());
    }

    #[test]
    fn test_custom_table_order() {
        let mut table = RoleFitTable::new();
        table.add_rule(RoleFitRule::new("ux", 70));
        table.add_rule(RoleFitRule::new("senior ux designer", 94));
        let report = score_fit("Senior UX Designer", &table, &profile());
        assert_eq!(report.score, 70);
    }

    #[test]
    fn test_from_analysis_clamps() {
        let report = FitReport::from_analysis(100, vec!["Research".to_string()], None, "Jon");
        assert_eq!(report.score, MAX_FIT_SCORE);
        assert_eq!(report.source, FitSource::Ai);
        assert_eq!(report.title, "Excellent Fit!");
    }
}
