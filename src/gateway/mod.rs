//! Axum HTTP gateway serving the journal-analysis and chat-relay functions.
//!
//! Layers applied to every route:
//! - Permissive CORS (browser clients call from any origin)
//! - Request body size limit (`[gateway] max_body_bytes`)
//! - Request timeout until response headers (`[gateway] request_timeout_secs`)

mod handlers;

use handlers::{handle_ai_chat, handle_analyze_journal, handle_health};

use crate::config::{Config, GatewayConfig, JournalConfig};
use crate::error::{GatewayError, LlmError};
use crate::llm::GatewayClient;
use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

pub const ANALYZE_JOURNAL_PATH: &str = "/functions/v1/analyze-journal";
pub const AI_CHAT_PATH: &str = "/functions/v1/ai-chat";

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured; AI routes then answer 500.
    pub client: Option<Arc<GatewayClient>>,
    pub journal: Arc<JournalConfig>,
    pub chat_system_prompt: Arc<str>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let client = match GatewayClient::new(&config.llm) {
            Ok(client) => Some(Arc::new(client)),
            Err(LlmError::Auth) => {
                tracing::warn!("No API key configured; AI routes will fail until one is set");
                None
            }
            Err(error) => {
                tracing::warn!(%error, "Gateway client unavailable");
                None
            }
        };

        Self {
            client,
            journal: Arc::new(config.journal.clone()),
            chat_system_prompt: Arc::from(config.chat.system_prompt.as_str()),
        }
    }
}

fn is_public_bind(host: &str) -> bool {
    !matches!(
        host,
        "127.0.0.1" | "localhost" | "::1" | "[::1]" | "0:0:0:0:0:0:0:1"
    )
}

pub fn build_router(state: AppState, gateway: &GatewayConfig) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route(ANALYZE_JOURNAL_PATH, post(handle_analyze_journal))
        .route(AI_CHAT_PATH, post(handle_ai_chat))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(gateway.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(gateway.request_timeout_secs),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Bind `host:port` and serve until the process is stopped.
pub async fn run_gateway(host: &str, port: u16, config: &Config) -> Result<(), GatewayError> {
    if is_public_bind(host) && !config.gateway.allow_public_bind {
        return Err(GatewayError::PublicBind(host.to_string()));
    }

    let listener = tokio::net::TcpListener::bind((host, port)).await?;

    run_gateway_with_listener(listener, config).await
}

/// Serve on a pre-bound listener.
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    config: &Config,
) -> Result<(), GatewayError> {
    let local_addr = listener.local_addr()?;
    let app = build_router(AppState::from_config(config), &config.gateway);

    tracing::info!(addr = %local_addr, "Gateway listening");
    println!("◆ MindMate gateway listening on http://{local_addr}");
    println!("  POST {ANALYZE_JOURNAL_PATH}");
    println!("  POST {AI_CHAT_PATH}");
    println!("  GET  /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(GatewayError::Serve)
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "Failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Gateway shutting down");
}
