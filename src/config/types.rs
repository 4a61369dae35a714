//! Configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// AI provider kind.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Gemini,
    Claude,
}

/// Configuration for the generative-answer client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Whether the generative fallback is used at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Provider to use (openai, gemini or claude).
    #[serde(default)]
    pub provider: ProviderKind,
    /// Model name sent to the provider.
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Base URL for the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable name for the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Retries on 5xx responses. Zero disables retrying.
    #[serde(default)]
    pub max_retries: u32,
    /// Ask the provider for role-fit analysis before the local scorer.
    #[serde(default = "default_true")]
    pub use_for_fit: bool,
}

fn default_true() -> bool {
    true
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    300
}

fn default_temperature() -> f32 {
    0.7
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: ProviderKind::default(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            max_retries: 0,
            use_for_fit: true,
        }
    }
}

/// Who the bot talks about, and the keyword lists the fit heuristic uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Display name of the portfolio owner.
    pub name: String,
    /// Industry keywords worth a bonus in the fit heuristic.
    pub industries: Vec<String>,
    /// Seniority keywords worth a bonus in the fit heuristic.
    pub seniority_keywords: Vec<String>,
    /// Core-discipline keywords worth a bonus in the fit heuristic.
    pub core_keywords: Vec<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Jon".to_string(),
            industries: to_strings(&[
                "saas",
                "healthcare",
                "e-commerce",
                "government",
                "education",
                "automotive",
            ]),
            seniority_keywords: to_strings(&["senior", "lead", "principal"]),
            core_keywords: to_strings(&["ux", "design", "product"]),
        }
    }
}

/// Where the static knowledge files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Directory holding the JSON files.
    pub data_dir: PathBuf,
    /// Primary Q&A file.
    pub qa_file: String,
    /// Older Q&A file, tried when the primary one is unavailable.
    pub legacy_qa_file: String,
    /// Project records.
    pub projects_file: String,
    /// Prior roles.
    pub bio_file: String,
    /// "About" section.
    pub about_file: String,
    /// Project ids never shown to visitors.
    pub hidden_projects: Vec<String>,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            qa_file: "jon_know_how.json".to_string(),
            legacy_qa_file: "qa_kb.json".to_string(),
            projects_file: "projects_kb.json".to_string(),
            bio_file: "bio.json".to_string(),
            about_file: "about_kb.json".to_string(),
            hidden_projects: to_strings(&[
                "oysho-inditex",
                "pull-bear-inditex",
                "la-caixa-fintech",
                "veridata-design-system",
                "tacktics-construction",
                "appsamblea-startup",
                "biscay-administration",
                "pharmacists-madrid",
            ]),
        }
    }
}

/// Thresholds of the knowledge matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatcherConfig {
    /// A direct match needs a score strictly above this.
    pub acceptance_threshold: u32,
    /// The semantic pass needs a combined score strictly above this.
    pub semantic_threshold: f64,
    /// Minimum canonical-question similarity that earns points.
    pub canonical_min_similarity: f64,
    /// Minimum variant similarity that earns points.
    pub variant_min_similarity: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: 12,
            semantic_threshold: 8.0,
            canonical_min_similarity: 0.7,
            variant_min_similarity: 0.6,
        }
    }
}

/// One role-fit rule as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleSpec {
    pub keyword: String,
    pub score: u8,
    /// Whole-word spellings; when set the rule ignores plain substring hits.
    #[serde(default)]
    pub whole_word: Vec<String>,
}

/// Role-fit configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Replaces the built-in rule table when non-empty. File order is kept.
    pub rules: Vec<RuleSpec>,
}

/// HTTP API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable permissive CORS.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_permissive: true,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub profile: ProfileConfig,
    pub knowledge: KnowledgeConfig,
    pub matcher: MatcherConfig,
    pub fit: FitConfig,
    pub ai: AiConfig,
    pub server: ServerConfig,
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
