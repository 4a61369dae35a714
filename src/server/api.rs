//! Request and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};

use crate::chat::{Action, ConversationContext, Reply};

/// Body of POST /api/chat.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    /// Free text from the visitor.
    #[serde(default)]
    pub message: String,
    /// A card action; takes precedence over `message`.
    #[serde(default)]
    pub action: Option<Action>,
    /// Context returned by the previous call, if any.
    #[serde(default)]
    pub context: Option<ConversationContext>,
}

/// Response of POST /api/chat.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    /// `None` when the message was blank.
    pub reply: Option<Reply>,
    /// Context to send with the next call.
    pub context: ConversationContext,
}

/// Body of POST /api/fit.
#[derive(Debug, Clone, Deserialize)]
pub struct FitRequest {
    pub job_text: String,
}

/// Response of GET /api/health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub name: String,
    pub qa_entries: usize,
    pub projects: usize,
    /// Whether the generative fallback is attached.
    pub ai: bool,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
