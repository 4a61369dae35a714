//! HTTP API for the chatbot.

mod api;
mod app;
mod error;
mod handlers;

pub use api::{ChatRequest, ChatResponse, ErrorResponse, FitRequest, HealthResponse};
pub use app::ChatServer;
pub use error::{ApiError, ServerError};
pub use handlers::AppState;
