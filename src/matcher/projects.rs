//! Keyword search over project records.

use crate::knowledge::ProjectEntry;

/// Most results a search returns.
pub const MAX_RESULTS: usize = 8;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "can", "this", "that", "these", "those", "what", "how",
    "when", "where", "why", "who",
];

/// Related-term groups: a query term in a group rewards projects about it.
const GROUPS: &[(&str, &[&str])] = &[
    (
        "design",
        &["ux", "ui", "interface", "user", "experience", "prototype", "wireframe"],
    ),
    (
        "development",
        &["frontend", "front-end", "code", "programming", "software", "web", "app"],
    ),
    (
        "research",
        &["user-research", "interview", "testing", "usability", "analysis", "study"],
    ),
    (
        "management",
        &["project", "team", "lead", "manage", "coordinate", "planning"],
    ),
    (
        "healthcare",
        &["health", "medical", "hospital", "clinic", "patient", "doctor"],
    ),
    (
        "automotive",
        &["car", "vehicle", "manufacturing", "factory", "industrial"],
    ),
    (
        "fashion",
        &["retail", "clothing", "style", "shopping", "e-commerce"],
    ),
    (
        "startup",
        &["startup", "emerging", "innovative", "fast-paced", "agile"],
    ),
    (
        "enterprise",
        &["corporate", "large", "business", "enterprise", "organization"],
    ),
    (
        "government",
        &["public", "government", "administration", "citizen", "public-sector"],
    ),
];

/// Words that make a query a request for one sector's projects.
const SECTOR_WORDS: &[&str] = &["fashion", "retail", "clothing", "apparel", "style"];

const TERM_POINTS: u32 = 1;
const NAME_BONUS: u32 = 3;
const DOMAIN_BONUS: u32 = 3;
const FIELD_BONUS: u32 = 2;
const GROUP_POINTS: u32 = 2;

/// A project with how well it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectHit<'a> {
    pub project: &'a ProjectEntry,
    pub score: u32,
    pub matched_terms: u32,
    pub group_matches: u32,
}

/// Query terms worth searching for.
#[must_use]
pub fn search_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|t| t.chars().count() > 2 && !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

fn any_contains(items: &[String], term: &str) -> bool {
    items.iter().any(|i| i.to_lowercase().contains(term))
}

fn score_project<'a>(project: &'a ProjectEntry, terms: &[String]) -> ProjectHit<'a> {
    let text = project.search_text();
    let mut hit = ProjectHit {
        project,
        score: 0,
        matched_terms: 0,
        group_matches: 0,
    };

    for term in terms.iter().filter(|t| text.contains(t.as_str())) {
        hit.score += TERM_POINTS;
        hit.matched_terms += 1;

        if project.name.to_lowercase().contains(term.as_str()) {
            hit.score += NAME_BONUS;
        }
        if project.domain.to_lowercase().contains(term.as_str()) {
            hit.score += DOMAIN_BONUS;
        }
        let field_hits = [
            any_contains(&project.keywords, term),
            project.client.to_lowercase().contains(term.as_str()),
            project.role.to_lowercase().contains(term.as_str()),
            any_contains(&project.methodologies, term),
        ];
        for _ in field_hits.iter().filter(|h| **h) {
            hit.score += FIELD_BONUS;
        }
    }

    for (group, related) in GROUPS {
        let asked = terms.iter().any(|t| related.contains(&t.as_str()));
        let about = text.contains(group)
            || project.keywords.iter().any(|k| related.contains(&k.as_str()));
        if asked && about {
            hit.score += GROUP_POINTS;
            hit.group_matches += 1;
        }
    }

    hit
}

/// Projects relevant to `query`, best first, at most [`MAX_RESULTS`].
///
/// A project is relevant when at least one term or group matched.
#[must_use]
pub fn search_projects<'a>(query: &str, projects: &'a [ProjectEntry]) -> Vec<ProjectHit<'a>> {
    let terms = search_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<_> = projects
        .iter()
        .map(|p| score_project(p, &terms))
        .filter(|h| h.matched_terms > 0 || h.group_matches > 0)
        .collect();

    hits.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.group_matches.cmp(&a.group_matches))
            .then_with(|| b.matched_terms.cmp(&a.matched_terms))
    });
    hits.truncate(MAX_RESULTS);

    tracing::debug!(terms = terms.len(), hits = hits.len(), "Project search");
    hits
}

/// The sector word in `query`, if it asks for a sector listing.
#[must_use]
pub fn sector_of(query: &str) -> Option<&'static str> {
    let query = query.to_lowercase();
    SECTOR_WORDS.iter().copied().find(|w| query.contains(w))
}

/// Projects whose domain or keywords mention `sector`.
#[must_use]
pub fn projects_in_sector<'a>(sector: &str, projects: &'a [ProjectEntry]) -> Vec<&'a ProjectEntry> {
    let sector = sector.to_lowercase();
    projects
        .iter()
        .filter(|p| p.domain.to_lowercase().contains(&sector) || any_contains(&p.keywords, &sector))
        .collect()
}
