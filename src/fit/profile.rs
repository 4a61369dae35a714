//! What the fit heuristic knows about the candidate.

use serde::Serialize;

use crate::config::ProfileConfig;
use crate::knowledge::KnowledgeBase;

/// A prior role from the bio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriorRole {
    /// Lowercased company or role name.
    pub name: String,
    /// Lowercased title segments.
    pub titles: Vec<String>,
    /// Lowercased role summary.
    pub summary: String,
}

/// Keyword sets the fit heuristic checks a job description against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CandidateProfile {
    /// Display name.
    pub name: String,
    pub skills: Vec<String>,
    /// Primary domain of each project, repeated when projects share one.
    pub domains: Vec<String>,
    pub prior_roles: Vec<PriorRole>,
    pub industries: Vec<String>,
    pub seniority_keywords: Vec<String>,
    pub core_keywords: Vec<String>,
}

fn push_unique(list: &mut Vec<String>, item: String) {
    if !item.is_empty() && !list.contains(&item) {
        list.push(item);
    }
}

impl CandidateProfile {
    /// Derive the profile from loaded knowledge plus configured keyword lists.
    ///
    /// Skills come from project skills and bio titles, domains from the first
    /// segment of each project's domain list (one per project), prior roles
    /// from the bio.
    #[must_use]
    pub fn from_knowledge(kb: &KnowledgeBase, config: &ProfileConfig) -> Self {
        let mut skills = Vec::new();
        for project in kb.projects() {
            for skill in &project.skills_used {
                push_unique(&mut skills, skill.trim().to_lowercase());
            }
        }
        for role in kb.bio() {
            for title in role.title_keywords() {
                push_unique(&mut skills, title);
            }
        }

        let domains: Vec<String> = kb
            .projects()
            .iter()
            .filter_map(|p| p.primary_domain())
            .collect();

        let prior_roles = kb
            .bio()
            .iter()
            .map(|role| PriorRole {
                name: role.name.trim().to_lowercase(),
                titles: role.title_keywords().collect(),
                summary: role.summary.trim().to_lowercase(),
            })
            .collect();

        let lowered =
            |items: &[String]| -> Vec<String> { items.iter().map(|s| s.to_lowercase()).collect() };

        let profile = Self {
            name: config.name.clone(),
            skills,
            domains,
            prior_roles,
            industries: lowered(&config.industries),
            seniority_keywords: lowered(&config.seniority_keywords),
            core_keywords: lowered(&config.core_keywords),
        };
        tracing::debug!(
            skills = profile.skills.len(),
            domains = profile.domains.len(),
            roles = profile.prior_roles.len(),
            "Candidate profile built"
        );
        profile
    }

    /// Plain-text digest for prompts.
    #[must_use]
    pub fn describe(&self) -> String {
        let roles: Vec<&str> = self.prior_roles.iter().map(|r| r.name.as_str()).collect();
        let mut domains: Vec<&str> = Vec::new();
        for domain in &self.domains {
            if !domains.contains(&domain.as_str()) {
                domains.push(domain);
            }
        }
        format!(
            "Name: {}\nSkills: {}\nDomains: {}\nPrior roles: {}\nIndustries: {}",
            self.name,
            self.skills.join(", "),
            domains.join(", "),
            roles.join(", "),
            self.industries.join(", "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{BioEntry, ProjectEntry};

    fn kb() -> KnowledgeBase {
        let projects: Vec<ProjectEntry> = serde_json::from_value(serde_json::json!([
            {"id": "a", "project_name": "A", "domain": "Fashion, Retail", "skillsUsed": ["Figma", "UX research"]},
            {"id": "b", "project_name": "B", "domain": "fashion", "skillsUsed": ["figma"]},
            {"id": "c", "project_name": "C", "domain": ""}
        ]))
        .unwrap();
        let bio = vec![BioEntry {
            name: "ZARA".to_string(),
            title: "Senior UX Designer, Design Systems".to_string(),
            summary: "Store tooling for Fashion retail teams.".to_string(),
        }];
        KnowledgeBase::new(Vec::new(), projects, bio)
    }

    #[test]
    fn test_from_knowledge() {
        let profile = CandidateProfile::from_knowledge(&kb(), &ProfileConfig::default());
        assert_eq!(profile.name, "Jon");
        assert_eq!(
            profile.skills,
            vec!["figma", "ux research", "senior ux designer", "design systems"]
        );
        assert_eq!(profile.domains, vec!["fashion", "fashion"]);
        assert_eq!(profile.prior_roles.len(), 1);
        assert_eq!(profile.prior_roles[0].name, "zara");
        assert_eq!(
            profile.prior_roles[0].summary,
            "store tooling for fashion retail teams."
        );
        assert_eq!(profile.seniority_keywords, vec!["senior", "lead", "principal"]);
    }

    #[test]
    fn test_describe() {
        let profile = CandidateProfile::from_knowledge(&kb(), &ProfileConfig::default());
        let text = profile.describe();
        assert!(text.contains("Name: Jon"));
        assert!(text.contains("Prior roles: zara"));
        assert!(text.contains("Domains: fashion\n"));
    }
}
