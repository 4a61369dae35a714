//! Knowledge-base records.
//!
//! Every record deserializes through a `Raw*` shape that accepts all field
//! spellings seen in the data files (`snake_case`, `camelCase`, `PascalCase`
//! and the older mock-API names). Code past this module only sees one name per
//! field.

use serde::{Deserialize, Deserializer, Serialize};

/// One canonical question and its answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawQaEntry")]
pub struct QaEntry {
    /// Stable identifier, unique within a corpus.
    pub intent_key: String,
    /// Primary phrasing; the strongest matching signal.
    pub canonical_question: String,
    /// Alternative phrasings.
    pub variants: Vec<String>,
    pub tags: Vec<String>,
    pub industries: Vec<String>,
    pub answer: String,
    /// Declared confidence in `[0, 1]`.
    pub confidence: f64,
}

#[derive(Deserialize)]
struct RawQaEntry {
    #[serde(alias = "intentKey")]
    intent_key: String,
    #[serde(default, alias = "canonicalQuestion")]
    canonical_question: String,
    #[serde(default, alias = "questionVariants")]
    question_variants: Vec<String>,
    #[serde(default)]
    variants: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    industries: Vec<String>,
    #[serde(default, alias = "answerEn")]
    answer_en: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default, alias = "confidenceScore")]
    confidence_score: Option<f64>,
    #[serde(default)]
    confidence: Option<f64>,
}

impl From<RawQaEntry> for QaEntry {
    fn from(raw: RawQaEntry) -> Self {
        let mut variants = raw.question_variants;
        variants.extend(raw.variants);

        let confidence = raw
            .confidence_score
            .or(raw.confidence)
            .filter(|c| c.is_finite())
            .map_or(0.0, |c| c.clamp(0.0, 1.0));

        Self {
            intent_key: raw.intent_key,
            canonical_question: raw.canonical_question,
            variants: dedup(variants),
            tags: dedup(raw.tags),
            industries: dedup(raw.industries),
            answer: first_non_empty([raw.answer_en, raw.answer]),
            confidence,
        }
    }
}

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawProjectEntry")]
pub struct ProjectEntry {
    pub id: String,
    pub name: String,
    /// Comma-separated domain list, e.g. `"Fashion, B2C, Platform"`.
    pub domain: String,
    pub client: String,
    pub role: String,
    pub problem_solved: String,
    pub what_was_done: String,
    pub results_metrics: String,
    pub keywords: Vec<String>,
    pub skills_used: Vec<String>,
    pub methodologies: Vec<String>,
    pub case_study_link: Option<String>,
}

impl ProjectEntry {
    /// First segment of the domain list, lowercased.
    #[must_use]
    pub fn primary_domain(&self) -> Option<String> {
        self.domain
            .split(',')
            .next()
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty())
    }

    /// All searchable text of the project, lowercased.
    #[must_use]
    pub fn search_text(&self) -> String {
        [
            self.name.as_str(),
            self.problem_solved.as_str(),
            self.what_was_done.as_str(),
            self.domain.as_str(),
            self.client.as_str(),
            self.role.as_str(),
        ]
        .into_iter()
        .map(str::to_string)
        .chain(self.keywords.iter().cloned())
        .chain(self.methodologies.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }
}

#[derive(Deserialize)]
struct RawProjectEntry {
    #[serde(default, deserialize_with = "string_or_number")]
    id: String,
    #[serde(default, alias = "projectName")]
    project_name: Option<String>,
    #[serde(default, alias = "Title")]
    title: Option<String>,
    #[serde(default, alias = "Domain")]
    domain: Option<String>,
    #[serde(default, alias = "Client")]
    client: Option<String>,
    #[serde(default, alias = "Role")]
    role: Option<String>,
    #[serde(default, alias = "problemSolved")]
    problem_solved: Option<String>,
    #[serde(default, alias = "Description")]
    description: Option<String>,
    #[serde(default, alias = "whatJonDid", alias = "whatWasDone")]
    what_jon_did: Option<String>,
    #[serde(default, alias = "resultsMetrics")]
    results_metrics: Option<String>,
    #[serde(default, alias = "measurableResults", alias = "MeasurableResults")]
    measurable_results: Option<String>,
    #[serde(default, alias = "Keywords")]
    keywords: Vec<String>,
    #[serde(default, alias = "skillsUsed", alias = "SkillsUsed")]
    skills_used: Vec<String>,
    #[serde(default)]
    methodologies: Vec<String>,
    #[serde(default, alias = "caseStudyAvailable")]
    case_study_available: Option<bool>,
    #[serde(default, alias = "caseStudyLink")]
    case_study_link: Option<String>,
    #[serde(default, alias = "Link")]
    link: Option<String>,
}

impl From<RawProjectEntry> for ProjectEntry {
    fn from(raw: RawProjectEntry) -> Self {
        let link = first_non_empty([raw.case_study_link, raw.link]);
        let case_study_link = if link.is_empty() || raw.case_study_available == Some(false) {
            None
        } else {
            Some(link)
        };

        Self {
            id: raw.id,
            name: first_non_empty([raw.project_name, raw.title]),
            domain: raw.domain.unwrap_or_default(),
            client: raw.client.unwrap_or_default(),
            role: raw.role.unwrap_or_default(),
            problem_solved: first_non_empty([raw.problem_solved, raw.description]),
            what_was_done: raw.what_jon_did.unwrap_or_default(),
            results_metrics: first_non_empty([raw.results_metrics, raw.measurable_results]),
            keywords: dedup(raw.keywords),
            skills_used: dedup(raw.skills_used),
            methodologies: raw.methodologies,
            case_study_link,
        }
    }
}

/// A prior role from the bio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BioEntry {
    /// Company or role name.
    #[serde(default, alias = "Name")]
    pub name: String,
    /// Comma-separated titles and skills.
    #[serde(default, alias = "Title")]
    pub title: String,
    #[serde(default, alias = "Summary")]
    pub summary: String,
}

impl BioEntry {
    /// Title segments, trimmed and lowercased.
    pub fn title_keywords(&self) -> impl Iterator<Item = String> + '_ {
        self.title
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }
}

/// The "About" card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutSection {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "description")]
    pub paragraphs: Vec<String>,
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or_default()
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
