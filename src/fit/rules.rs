//! Fixed-score role rules.
//!
//! A table of role keywords checked in order against a job description. The
//! first rule that matches decides the score, even when a later rule would
//! match a longer keyword.

use regex::Regex;

use crate::config::{FitConfig, RuleSpec};

/// Highest score a fit can ever have.
pub const MAX_FIT_SCORE: u8 = 97;

/// Error type for rule construction.
#[derive(thiserror::Error, Debug)]
pub enum RuleError {
    /// Invalid whole-word pattern.
    #[error("Invalid rule pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

#[derive(Debug, Clone)]
enum Matcher {
    Substring,
    WholeWord(Regex),
}

/// A role keyword with the fit score it grants.
#[derive(Debug, Clone)]
pub struct RoleFitRule {
    keyword: String,
    score: u8,
    matcher: Matcher,
}

impl RoleFitRule {
    /// Create a rule that matches `keyword` anywhere in the text.
    ///
    /// Scores above [`MAX_FIT_SCORE`] are clamped.
    #[must_use]
    pub fn new(keyword: impl Into<String>, score: u8) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            score: score.min(MAX_FIT_SCORE),
            matcher: Matcher::Substring,
        }
    }

    /// Create a rule that matches only when one of `spellings` appears as
    /// whole words.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidPattern` if the combined pattern fails to
    /// compile.
    pub fn whole_word<S: AsRef<str>>(
        keyword: impl Into<String>,
        score: u8,
        spellings: &[S],
    ) -> Result<Self, RuleError> {
        let alternatives = spellings
            .iter()
            .map(|s| regex::escape(s.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{alternatives})\b"))?;

        Ok(Self {
            matcher: Matcher::WholeWord(pattern),
            ..Self::new(keyword, score)
        })
    }

    /// Check a lowercased job description against this rule.
    #[must_use]
    pub fn matches(&self, job_text: &str) -> bool {
        if self.keyword.is_empty() {
            return false;
        }
        match &self.matcher {
            Matcher::Substring => job_text.contains(&self.keyword),
            Matcher::WholeWord(pattern) => pattern.is_match(job_text),
        }
    }

    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    #[must_use]
    pub fn score(&self) -> u8 {
        self.score
    }

    /// True for rules restricted to whole words.
    #[must_use]
    pub fn is_whole_word(&self) -> bool {
        matches!(self.matcher, Matcher::WholeWord(_))
    }
}

impl TryFrom<&RuleSpec> for RoleFitRule {
    type Error = RuleError;

    fn try_from(spec: &RuleSpec) -> Result<Self, Self::Error> {
        if spec.whole_word.is_empty() {
            Ok(Self::new(spec.keyword.as_str(), spec.score))
        } else {
            Self::whole_word(spec.keyword.as_str(), spec.score, spec.whole_word.as_slice())
        }
    }
}

/// Ordered role rules.
#[derive(Debug, Clone, Default)]
pub struct RoleFitTable {
    rules: Vec<RoleFitRule>,
}

impl RoleFitTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a table holding the built-in role scores.
    #[must_use]
    pub fn with_default_rules() -> Self {
        let rules = Self::default_rules()
            .into_iter()
            .filter_map(|result| match result {
                Ok(rule) => Some(rule),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to compile default role rule");
                    None
                }
            })
            .collect();
        Self { rules }
    }

    /// Build a table from configured rules, in the given order.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidPattern` if any rule fails to compile.
    pub fn from_specs(specs: &[RuleSpec]) -> Result<Self, RuleError> {
        let rules = specs
            .iter()
            .map(RoleFitRule::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// The configured table, or the built-in one when none is configured.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidPattern` if a configured rule fails to compile.
    pub fn from_config(config: &FitConfig) -> Result<Self, RuleError> {
        if config.rules.is_empty() {
            Ok(Self::with_default_rules())
        } else {
            tracing::debug!(count = config.rules.len(), "Using configured role rules");
            Self::from_specs(&config.rules)
        }
    }

    /// Append a rule; it ranks below every existing rule.
    pub fn add_rule(&mut self, rule: RoleFitRule) {
        self.rules.push(rule);
    }

    /// The first rule matching `job_text`, in table order.
    #[must_use]
    pub fn first_match(&self, job_text: &str) -> Option<&RoleFitRule> {
        let lowered = job_text.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&lowered))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn rules(&self) -> &[RoleFitRule] {
        &self.rules
    }

    fn default_rules() -> Vec<Result<RoleFitRule, RuleError>> {
        const SUBSTRING_RULES: &[(&str, u8)] = &[
            ("ux manager", 64),
            ("design system", 82),
            ("product designer", 84),
            ("ux researcher", 85),
            ("ux research", 85),
            ("ui designer", 87),
            ("interaction designer", 81),
            ("service designer", 54),
            ("front end designer", 93),
            ("ux writer", 44),
            ("accessibility specialist", 56),
            ("human-centered design strategist", 76),
            ("product strategist", 72),
            ("branding specialist", 4),
            ("ux/ui", 93),
            ("ux design lead", 89),
            ("ux lead", 89),
            ("principal ux designer", 93),
            ("digital product design engineer", 91),
            ("web designer", 94),
            ("lead ui/ux designer", 83),
            ("senior ux designer", 94),
            ("senior ux researcher", 82),
            ("conversational ux designer", 77),
            ("system designer", 78),
            ("industrial product designer", 44),
            ("ai designer", 84),
            ("content designer", 64),
            ("full stack engineer", 25),
            ("saas", 89),
            ("app ux", 84),
            ("app ux/ui", 85),
            ("software design", 95),
            ("e-commerce ux/ui", 81),
            ("design engineer", 88),
            ("ux engineer", 88),
            ("creative developer", 88),
            ("frontend designer", 88),
            ("strategic product design", 91),
            ("behavioural design", 89),
            ("psychology design", 89),
            ("ui design", 91),
            ("ui", 91),
            ("user interface", 91),
            ("interaction design", 91),
            ("visual design", 91),
            ("experience designer", 91),
            ("interface designer", 91),
            ("front end developer", 64),
        ];
        const DEVELOPER_RULES: &[&str] = &[
            "software engineer",
            "web developer",
            "application developer",
            "devops engineer",
            "cloud engineer",
            "api developer",
            "database developer",
            "platform engineer",
        ];

        let mut rules: Vec<_> = SUBSTRING_RULES
            .iter()
            .map(|(keyword, score)| Ok(RoleFitRule::new(*keyword, *score)))
            .collect();
        rules.push(RoleFitRule::whole_word(
            "front end",
            64,
            &["front end", "front-end", "frontend"],
        ));
        rules.extend(
            DEVELOPER_RULES
                .iter()
                .map(|keyword| Ok(RoleFitRule::new(*keyword, 39))),
        );
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = RoleFitTable::with_default_rules();
        assert_eq!(table.len(), 58);
        assert_eq!(table.rules()[0].keyword(), "ux manager");
        assert!(table.rules().iter().all(|r| r.score() <= MAX_FIT_SCORE));
        assert_eq!(table.rules().iter().filter(|r| r.is_whole_word()).count(), 1);
    }

    #[test]
    fn test_first_match_wins() {
        let table = RoleFitTable::with_default_rules();
        // "ux researcher" (85) precedes "senior ux researcher" (82).
        let rule = table.first_match("Senior UX Researcher").unwrap();
        assert_eq!(rule.keyword(), "ux researcher");
        assert_eq!(rule.score(), 85);

        let rule = table.first_match("Senior UX Designer").unwrap();
        assert_eq!(rule.score(), 94);
    }

    #[test]
    fn test_whole_word_front_end() {
        let rule = RoleFitRule::whole_word("front end", 64, &["front end", "front-end", "frontend"])
            .unwrap();
        assert!(rule.matches("front-end engineer"));
        assert!(rule.matches("frontend"));
        assert!(rule.matches("we need a front end person"));
        assert!(!rule.matches("storefront endpoints"));
        assert!(!rule.matches("frontends"));
    }

    #[test]
    fn test_score_clamped() {
        assert_eq!(RoleFitRule::new("dream job", 100).score(), MAX_FIT_SCORE);
    }

    #[test]
    fn test_empty_keyword_never_matches() {
        assert!(!RoleFitRule::new("", 50).matches("anything"));
    }

    #[test]
    fn test_from_config_keeps_order() {
        let config = FitConfig {
            rules: vec![
                RuleSpec {
                    keyword: "UX".to_string(),
                    score: 70,
                    whole_word: Vec::new(),
                },
                RuleSpec {
                    keyword: "senior ux designer".to_string(),
                    score: 94,
                    whole_word: Vec::new(),
                },
            ],
        };
        let table = RoleFitTable::from_config(&config).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.first_match("Senior UX Designer").unwrap().score(), 70);
    }

    #[test]
    fn test_from_config_empty_uses_defaults() {
        let table = RoleFitTable::from_config(&FitConfig::default()).unwrap();
        assert_eq!(table.len(), 58);
    }
}
