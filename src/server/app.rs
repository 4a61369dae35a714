//! HTTP server with axum router and graceful shutdown.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::error::ServerError;
use super::handlers::{get_about, get_health, get_projects, post_chat, post_fit, AppState};
use crate::chat::ChatEngine;
use crate::config::ServerConfig;

/// HTTP front end for a [`ChatEngine`].
#[derive(Debug)]
pub struct ChatServer {
    config: ServerConfig,
    state: AppState,
    cancel: CancellationToken,
}

impl ChatServer {
    /// Create a server with default configuration.
    #[must_use]
    pub fn new(engine: Arc<ChatEngine>) -> Self {
        Self {
            config: ServerConfig::default(),
            state: AppState::new(engine),
            cancel: CancellationToken::new(),
        }
    }

    /// Set the server configuration (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Token that stops the server when cancelled.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Get the configured address as a string.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router with all routes and middleware.
    pub fn build_router(&self) -> Router {
        let router = Router::new()
            .route("/api/health", get(get_health))
            .route("/api/chat", post(post_chat))
            .route("/api/fit", post(post_fit))
            .route("/api/projects", get(get_projects))
            .route("/api/about", get(get_about))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http());

        if self.config.cors_permissive {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// Bind the configured address and serve until cancelled.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::BindError` if the address cannot be bound, or
    /// `ServerError::Serve` if serving fails.
    pub async fn run(self) -> Result<(), ServerError> {
        let address = self.address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::BindError {
                address: address.clone(),
                source,
            })?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener until cancelled.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Serve` if serving fails.
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        let app = self.build_router();
        let cancel = self.cancel.clone();

        match listener.local_addr() {
            Ok(addr) => tracing::info!(address = %addr, "Starting chat server"),
            Err(e) => tracing::warn!(error = %e, "Starting chat server on unknown address"),
        }

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
                tracing::info!("Chat server shutting down gracefully");
            })
            .await
            .map_err(ServerError::Serve)
    }
}
