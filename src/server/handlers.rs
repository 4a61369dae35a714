//! HTTP handlers for the chat API.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use super::api::{ChatRequest, ChatResponse, FitRequest, HealthResponse};
use super::error::ApiError;
use crate::chat::ChatEngine;
use crate::fit::FitReport;
use crate::knowledge::{AboutSection, ProjectEntry};

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: Arc<ChatEngine>,
}

impl AppState {
    #[must_use]
    pub fn new(engine: Arc<ChatEngine>) -> Self {
        Self { engine }
    }
}

/// GET /api/health - Liveness plus what was loaded.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let engine = &state.engine;
    Json(HealthResponse {
        status: "ok".to_string(),
        name: engine.name().to_string(),
        qa_entries: engine.knowledge().qa().len(),
        projects: engine.knowledge().projects().len(),
        ai: engine.has_ai(),
    })
}

/// POST /api/chat - Answer a message or run a card action.
pub async fn post_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let mut context = request.context.unwrap_or_default();
    let reply = match request.action {
        Some(action) => Some(state.engine.act(&mut context, action)),
        None => state.engine.respond(&mut context, &request.message).await,
    };
    Json(ChatResponse { reply, context })
}

/// POST /api/fit - Score a job description.
///
/// # Errors
///
/// Returns 400 when `job_text` is blank.
pub async fn post_fit(
    State(state): State<AppState>,
    Json(request): Json<FitRequest>,
) -> Result<Json<FitReport>, ApiError> {
    let job_text = request.job_text.trim();
    if job_text.is_empty() {
        return Err(ApiError::bad_request("job_text must not be empty"));
    }
    Ok(Json(state.engine.fit(job_text).await))
}

/// GET /api/projects - Every visible project.
pub async fn get_projects(State(state): State<AppState>) -> Json<Vec<ProjectEntry>> {
    Json(state.engine.knowledge().projects().to_vec())
}

/// GET /api/about - The "About" card.
///
/// # Errors
///
/// Returns 404 when no about section is loaded.
pub async fn get_about(State(state): State<AppState>) -> Result<Json<AboutSection>, ApiError> {
    state
        .engine
        .knowledge()
        .about()
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("No about section loaded"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{Action, ConversationContext, Reply};
    use crate::config::BotConfig;
    use crate::fit::{FitSource, RoleFitTable};
    use crate::knowledge::KnowledgeBase;
    use axum::http::StatusCode;

    fn state(about: Option<AboutSection>) -> AppState {
        let projects: Vec<ProjectEntry> = serde_json::from_value(serde_json::json!([
            {"id": "evcharge", "project_name": "Evcharge", "domain": "Electric Mobility"}
        ]))
        .unwrap();
        let knowledge = KnowledgeBase::new(Vec::new(), projects, Vec::new()).with_about(about);
        let engine = ChatEngine::new(
            Arc::new(knowledge),
            &BotConfig::default(),
            RoleFitTable::with_default_rules(),
        );
        AppState::new(Arc::new(engine))
    }

    #[tokio::test]
    async fn test_get_health() {
        let Json(health) = get_health(State(state(None))).await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.name, "Jon");
        assert_eq!(health.projects, 1);
        assert!(!health.ai);
    }

    #[tokio::test]
    async fn test_post_chat_threads_context() {
        let state = state(None);
        let Json(first) = post_chat(
            State(state.clone()),
            Json(ChatRequest {
                action: Some(Action::BeginFit),
                ..ChatRequest::default()
            }),
        )
        .await;
        assert!(matches!(first.reply, Some(Reply::FitPrompt { .. })));
        assert!(first.context.is_awaiting_role_description());

        let Json(second) = post_chat(
            State(state),
            Json(ChatRequest {
                message: "Senior UX Designer".to_string(),
                action: None,
                context: Some(first.context.clone()),
            }),
        )
        .await;
        let Some(Reply::Fit { report }) = second.reply else {
            panic!("expected fit reply");
        };
        assert_eq!(report.score, 94);
        assert_eq!(second.context.id(), first.context.id());
        assert!(!second.context.is_awaiting_role_description());
    }

    #[tokio::test]
    async fn test_post_chat_blank_message() {
        let Json(response) = post_chat(
            State(state(None)),
            Json(ChatRequest {
                message: "  ".to_string(),
                action: None,
                context: Some(ConversationContext::new()),
            }),
        )
        .await;
        assert!(response.reply.is_none());
        assert!(response.context.is_empty());
    }

    #[tokio::test]
    async fn test_post_fit() {
        let Json(report) = post_fit(
            State(state(None)),
            Json(FitRequest {
                job_text: "Creative Developer".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(report.score, 88);
        assert_eq!(report.source, FitSource::Rule);
    }

    #[tokio::test]
    async fn test_post_fit_blank() {
        let error = post_fit(
            State(state(None)),
            Json(FitRequest {
                job_text: " ".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_about() {
        let error = get_about(State(state(None))).await.unwrap_err();
        assert_eq!(error.status, StatusCode::NOT_FOUND);

        let about = AboutSection {
            title: "About".to_string(),
            paragraphs: vec!["Designer.".to_string()],
        };
        let Json(found) = get_about(State(state(Some(about.clone())))).await.unwrap();
        assert_eq!(found, about);
    }

    #[tokio::test]
    async fn test_get_projects() {
        let Json(projects) = get_projects(State(state(None))).await;
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, "evcharge");
    }
}
