//! Multi-provider client for generated answers and role analysis.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use super::prompts::{
    assistant_system_prompt, format_question, format_role_analysis, ROLE_ANALYST_SYSTEM_PROMPT,
};
use crate::config::{AiConfig, ProviderKind};
use crate::fit::{CandidateProfile, FitReport, MAX_FIT_SCORE};

/// Connection timeout for HTTP requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall request timeout for HTTP requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build an HTTP client with proper timeout configuration.
fn build_http_client() -> Result<Client, AiError> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| AiError::RequestFailed(e.to_string()))
}

/// Determine if a request should be retried based on status code and attempt count.
fn should_retry(status_code: u16, attempt: u32, max_retries: u32) -> bool {
    if attempt >= max_retries {
        return false;
    }
    // Retry on 5xx server errors
    (500..600).contains(&status_code)
}

/// Calculate exponential backoff duration for retry attempts.
fn calculate_backoff(attempt: u32) -> Duration {
    // Exponential backoff: 1s, 2s, 4s
    Duration::from_secs(1 << attempt.min(6))
}

/// Errors from AI client operations.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("API key not configured (env: {0})")]
    MissingApiKey(String),
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("API request failed: {0}")]
    RequestFailed(String),
    #[error("API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    ParseError(String),
    #[error("AI request timed out")]
    Timeout,
}

impl AiError {
    /// The message shown to the visitor instead of this error.
    #[must_use]
    pub fn guidance(&self, name: &str) -> String {
        match self {
            Self::MissingApiKey(_) | Self::Status { status: 401, .. } => {
                "I'm having trouble accessing my AI capabilities right now. Please check your API \
                 key configuration."
                    .to_string()
            }
            Self::Status { status: 429, .. } => {
                "I'm getting too many requests right now. Please try again in a moment.".to_string()
            }
            Self::Status { status, .. } if *status >= 500 => {
                "The AI service is experiencing issues. Please try again later.".to_string()
            }
            _ => format!(
                "I'm having technical difficulties with my AI features. Please try asking a \
                 question about {name}'s experience instead."
            ),
        }
    }
}

/// Trait for AI providers.
#[async_trait]
pub trait AiProvider: Send + Sync + fmt::Debug {
    /// Generate a response from the AI provider.
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError>;
}

/// Settings every HTTP provider shares.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub max_retries: u32,
}

impl ProviderSettings {
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Send a JSON request, retrying 5xx responses up to `max_retries` times.
async fn send_json(
    build: impl Fn() -> RequestBuilder + Send + Sync,
    max_retries: u32,
) -> Result<serde_json::Value, AiError> {
    let mut attempt = 0;
    loop {
        let response = build().send().await.map_err(|e| {
            if e.is_timeout() {
                AiError::Timeout
            } else {
                AiError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| AiError::ParseError(e.to_string()));
        }

        let status_code = status.as_u16();
        if should_retry(status_code, attempt, max_retries) {
            let backoff = calculate_backoff(attempt);
            tracing::debug!(status = status_code, attempt, ?backoff, "Retrying AI request");
            tokio::time::sleep(backoff).await;
            attempt += 1;
            continue;
        }

        let body = response.text().await.unwrap_or_default();
        return Err(AiError::Status {
            status: status_code,
            body,
        });
    }
}

fn text_at(json: &serde_json::Value, pointer: &str, provider: &str) -> Result<String, AiError> {
    json.pointer(pointer)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .ok_or_else(|| AiError::ParseError(format!("No text in {provider} response")))
}

/// OpenAI-compatible chat-completions provider.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: Client,
    settings: ProviderSettings,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider.
    ///
    /// # Errors
    ///
    /// Returns `AiError::RequestFailed` if the HTTP client cannot be built.
    pub fn new(settings: ProviderSettings) -> Result<Self, AiError> {
        Ok(Self {
            client: build_http_client()?,
            settings,
        })
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError> {
        let url = self.settings.endpoint("chat/completions");
        let body = serde_json::json!({
            "model": self.settings.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "max_tokens": self.settings.max_tokens,
            "temperature": self.settings.temperature
        });

        let json = send_json(
            || {
                self.client
                    .post(&url)
                    .bearer_auth(&self.settings.api_key)
                    .json(&body)
            },
            self.settings.max_retries,
        )
        .await?;

        text_at(&json, "/choices/0/message/content", "OpenAI")
    }
}

/// Gemini API provider.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    settings: ProviderSettings,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    ///
    /// # Errors
    ///
    /// Returns `AiError::RequestFailed` if the HTTP client cannot be built.
    pub fn new(settings: ProviderSettings) -> Result<Self, AiError> {
        Ok(Self {
            client: build_http_client()?,
            settings,
        })
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError> {
        let url = self
            .settings
            .endpoint(&format!("models/{}:generateContent", self.settings.model));
        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": user }]
            }],
            "systemInstruction": {
                "parts": [{ "text": system }]
            },
            "generationConfig": {
                "maxOutputTokens": self.settings.max_tokens,
                "temperature": self.settings.temperature
            }
        });

        let json = send_json(
            || {
                self.client
                    .post(&url)
                    .header("x-goog-api-key", &self.settings.api_key)
                    .json(&body)
            },
            self.settings.max_retries,
        )
        .await?;

        text_at(&json, "/candidates/0/content/parts/0/text", "Gemini")
    }
}

/// Claude API provider.
#[derive(Debug, Clone)]
pub struct ClaudeProvider {
    client: Client,
    settings: ProviderSettings,
}

impl ClaudeProvider {
    /// Create a new Claude provider.
    ///
    /// # Errors
    ///
    /// Returns `AiError::RequestFailed` if the HTTP client cannot be built.
    pub fn new(settings: ProviderSettings) -> Result<Self, AiError> {
        Ok(Self {
            client: build_http_client()?,
            settings,
        })
    }
}

#[async_trait]
impl AiProvider for ClaudeProvider {
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError> {
        let url = self.settings.endpoint("v1/messages");
        let body = serde_json::json!({
            "model": self.settings.model,
            "max_tokens": self.settings.max_tokens,
            "temperature": self.settings.temperature,
            "system": system,
            "messages": [{
                "role": "user",
                "content": user
            }]
        });

        let json = send_json(
            || {
                self.client
                    .post(&url)
                    .header("x-api-key", &self.settings.api_key)
                    .header("anthropic-version", "2023-06-01")
                    .json(&body)
            },
            self.settings.max_retries,
        )
        .await?;

        text_at(&json, "/content/0/text", "Claude")
    }
}

/// Fit analysis as returned by the model.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleAnalysis {
    pub fit_score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub why_its_a_match: Option<String>,
}

impl RoleAnalysis {
    /// The score as an integer in `0..=97`.
    #[must_use]
    pub fn clamped_score(&self) -> u8 {
        if !self.fit_score.is_finite() {
            return 0;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let score = self
            .fit_score
            .round()
            .clamp(0.0, f64::from(MAX_FIT_SCORE)) as u8;
        score
    }
}

/// Client for generated answers.
#[derive(Debug, Clone)]
pub struct AiClient {
    provider: Arc<dyn AiProvider>,
    config: AiConfig,
}

impl AiClient {
    /// Create a new client with the given provider and config.
    #[must_use]
    pub fn new(provider: Arc<dyn AiProvider>, config: AiConfig) -> Self {
        Self { provider, config }
    }

    /// Create client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `AiError::MissingApiKey` if the configured API key environment
    /// variable is not set, or `AiError::InvalidBaseUrl` if the base URL does
    /// not parse.
    pub fn from_config(config: AiConfig) -> Result<Self, AiError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AiError::MissingApiKey(config.api_key_env.clone()))?;

        url::Url::parse(&config.base_url).map_err(|e| AiError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let settings = ProviderSettings {
            base_url: config.base_url.clone(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            max_retries: config.max_retries,
        };

        let provider: Arc<dyn AiProvider> = match config.provider {
            ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(settings)?),
            ProviderKind::Gemini => Arc::new(GeminiProvider::new(settings)?),
            ProviderKind::Claude => Arc::new(ClaudeProvider::new(settings)?),
        };

        tracing::info!(provider = ?config.provider, model = %config.model, "AI client configured");
        Ok(Self { provider, config })
    }

    /// Get the configured model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the provider kind.
    #[must_use]
    pub fn provider_kind(&self) -> &ProviderKind {
        &self.config.provider
    }

    /// Whether role analysis should go through the model.
    #[must_use]
    pub fn use_for_fit(&self) -> bool {
        self.config.use_for_fit
    }

    /// Answer a question the knowledge base could not.
    ///
    /// # Errors
    ///
    /// Returns `AiError` if the request fails or the response has no text.
    pub async fn answer_question(
        &self,
        name: &str,
        question: &str,
        background: &str,
    ) -> Result<String, AiError> {
        let system = assistant_system_prompt(name);
        let user = format_question(name, question, background);
        self.provider.generate(&system, &user).await
    }

    /// Ask the model to score a job description against the profile.
    ///
    /// # Errors
    ///
    /// Returns `AiError::ParseError` if the response holds no usable JSON, or
    /// any request error.
    pub async fn analyze_role(
        &self,
        job_description: &str,
        profile: &CandidateProfile,
    ) -> Result<FitReport, AiError> {
        let user = format_role_analysis(&profile.name, job_description, &profile.describe());
        let text = self
            .provider
            .generate(ROLE_ANALYST_SYSTEM_PROMPT, &user)
            .await?;

        let analysis: RoleAnalysis = extract_json(&text)?;
        tracing::debug!(score = analysis.fit_score, "AI role analysis");
        Ok(FitReport::from_analysis(
            analysis.clamped_score(),
            analysis.strengths,
            analysis.why_its_a_match,
            &profile.name,
        ))
    }
}

/// Extract a JSON object from AI response text.
///
/// Looks for JSON in the response and parses it into the specified type.
///
/// # Errors
///
/// Returns `AiError::ParseError` if no JSON object is found or parsing fails.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T, AiError> {
    let json_start = text
        .find('{')
        .ok_or_else(|| AiError::ParseError(format!("No JSON object found in response: {text}")))?;

    let mut depth = 0;
    let mut json_end = json_start;
    for (i, c) in text[json_start..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    json_end = json_start + i + 1;
                    break;
                }
            }
            _ => {}
        }
    }

    let json_str = &text[json_start..json_end];
    serde_json::from_str(json_str)
        .map_err(|e| AiError::ParseError(format!("Failed to parse JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::{FitSource, FitTier};

    #[derive(Debug)]
    struct FixedProvider(Result<String, u16>);

    #[async_trait]
    impl AiProvider for FixedProvider {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String, AiError> {
            match &self.0 {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(AiError::Status {
                    status: *status,
                    body: String::new(),
                }),
            }
        }
    }

    fn client(reply: Result<String, u16>) -> AiClient {
        AiClient::new(Arc::new(FixedProvider(reply)), AiConfig::default())
    }

    fn profile() -> CandidateProfile {
        CandidateProfile {
            name: "Jon".to_string(),
            ..CandidateProfile::default()
        }
    }

    #[test]
    fn test_http_client_builds() {
        assert!(build_http_client().is_ok());
    }

    #[test]
    fn test_should_retry_logic() {
        // Disabled by default
        assert!(!should_retry(500, 0, 0));

        assert!(should_retry(500, 0, 3));
        assert!(should_retry(503, 2, 3));
        assert!(!should_retry(500, 3, 3));
        assert!(!should_retry(400, 0, 3));
        assert!(!should_retry(429, 0, 3));
        assert!(!should_retry(200, 0, 3));
    }

    #[test]
    fn test_calculate_backoff() {
        assert_eq!(calculate_backoff(0).as_secs(), 1);
        assert_eq!(calculate_backoff(1).as_secs(), 2);
        assert_eq!(calculate_backoff(2).as_secs(), 4);
    }

    #[test]
    fn test_guidance_mapping() {
        let status = |status| AiError::Status {
            status,
            body: String::new(),
        };
        assert!(status(401).guidance("Jon").contains("API key configuration"));
        assert!(status(429).guidance("Jon").contains("too many requests"));
        assert!(status(503).guidance("Jon").contains("experiencing issues"));
        assert!(status(404).guidance("Jon").contains("Jon's experience"));
        assert!(AiError::Timeout.guidance("Ada").contains("Ada's experience"));
        assert!(AiError::MissingApiKey("X".to_string())
            .guidance("Jon")
            .contains("API key configuration"));
    }

    #[test]
    fn test_extract_json_with_surrounding_text() {
        let text = r#"Sure! {"fitScore": 88, "strengths": ["Research"], "whyItsAMatch": "Because."} Done."#;
        let analysis: RoleAnalysis = extract_json(text).unwrap();
        assert!((analysis.fit_score - 88.0).abs() < f64::EPSILON);
        assert_eq!(analysis.strengths, vec!["Research"]);
    }

    #[test]
    fn test_extract_json_no_json() {
        let result: Result<RoleAnalysis, _> = extract_json("No JSON here");
        assert!(matches!(result, Err(AiError::ParseError(_))));
    }

    #[test]
    fn test_clamped_score() {
        let analysis = |fit_score| RoleAnalysis {
            fit_score,
            strengths: Vec::new(),
            why_its_a_match: None,
        };
        assert_eq!(analysis(100.0).clamped_score(), 97);
        assert_eq!(analysis(-5.0).clamped_score(), 0);
        assert_eq!(analysis(86.6).clamped_score(), 87);
        assert_eq!(analysis(f64::NAN).clamped_score(), 0);
    }

    #[tokio::test]
    async fn test_answer_question_passes_text_through() {
        let answer = client(Ok("Jon has 8+ years of experience.".to_string()))
            .answer_question("Jon", "How long?", "- Product design")
            .await
            .unwrap();
        assert_eq!(answer, "Jon has 8+ years of experience.");
    }

    #[tokio::test]
    async fn test_analyze_role() {
        let reply = r#"{"fitScore": 100, "strengths": ["Design systems"], "whyItsAMatch": "Strong overlap."}"#;
        let report = client(Ok(reply.to_string()))
            .analyze_role("Design systems lead", &profile())
            .await
            .unwrap();
        assert_eq!(report.score, 97);
        assert_eq!(report.source, FitSource::Ai);
        assert_eq!(report.tier, FitTier::Excellent);
        assert_eq!(report.note.as_deref(), Some("Strong overlap."));
    }

    #[tokio::test]
    async fn test_analyze_role_unparsable() {
        let result = client(Ok("I think it's a great fit!".to_string()))
            .analyze_role("Designer", &profile())
            .await;
        assert!(matches!(result, Err(AiError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let result = client(Err(429))
            .answer_question("Jon", "Hi", "")
            .await;
        assert!(matches!(result, Err(AiError::Status { status: 429, .. })));
    }

    #[test]
    fn test_from_config_missing_key() {
        let config = AiConfig {
            api_key_env: "PORTFOLIO_BOT_TEST_UNSET_KEY".to_string(),
            ..AiConfig::default()
        };
        let result = AiClient::from_config(config);
        assert!(matches!(result, Err(AiError::MissingApiKey(_))));
    }

    #[test]
    fn test_from_config_invalid_url() {
        std::env::set_var("PORTFOLIO_BOT_TEST_URL_KEY", "test-key");
        let config = AiConfig {
            base_url: "not a url".to_string(),
            api_key_env: "PORTFOLIO_BOT_TEST_URL_KEY".to_string(),
            ..AiConfig::default()
        };
        let result = AiClient::from_config(config);
        assert!(matches!(result, Err(AiError::InvalidBaseUrl { .. })));
        std::env::remove_var("PORTFOLIO_BOT_TEST_URL_KEY");
    }

    #[test]
    fn test_from_config_providers() {
        std::env::set_var("PORTFOLIO_BOT_TEST_KEY", "test-key");
        for (kind, model) in [
            (ProviderKind::OpenAi, "gpt-3.5-turbo"),
            (ProviderKind::Gemini, "gemini-2.0-flash"),
            (ProviderKind::Claude, "claude-sonnet-4-20250514"),
        ] {
            let config = AiConfig {
                provider: kind.clone(),
                model: model.to_string(),
                api_key_env: "PORTFOLIO_BOT_TEST_KEY".to_string(),
                ..AiConfig::default()
            };
            let client = AiClient::from_config(config).unwrap();
            assert_eq!(client.model(), model);
            assert_eq!(client.provider_kind(), &kind);
        }
        std::env::remove_var("PORTFOLIO_BOT_TEST_KEY");
    }
}
