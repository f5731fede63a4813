use super::AppState;
use crate::error::JournalError;
use crate::journal::JournalAnalyzer;
use crate::llm::{ChatMessage, Role, StreamAssembler, StreamState};
use axum::{
    body::Body,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use futures_util::StreamExt;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AnalyzeJournalBody {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct AiChatBody {
    pub messages: Vec<ChatMessage>,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, Json(body)).into_response()
}

fn missing_key_response() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "API key is not configured",
    )
}

/// GET /health
pub(super) async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /functions/v1/analyze-journal
pub(super) async fn handle_analyze_journal(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeJournalBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(%rejection, "Rejected analyze-journal body");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let Some(client) = state.client.as_deref() else {
        return missing_key_response();
    };

    match JournalAnalyzer::new(client, &state.journal)
        .analyze(&body.content)
        .await
    {
        Ok(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
        Err(JournalError::EmptyEntry) => {
            error_response(StatusCode::BAD_REQUEST, "Journal content is empty")
        }
        Err(error) => {
            tracing::error!(%error, "Journal analysis failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to analyze journal entry",
            )
        }
    }
}

/// POST /functions/v1/ai-chat
///
/// Relays the upstream event stream unchanged. A tap assembles the reply on
/// the side so the length and outcome can be logged once the stream ends.
pub(super) async fn handle_ai_chat(
    State(state): State<AppState>,
    body: Result<Json<AiChatBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(%rejection, "Rejected ai-chat body");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let Some(client) = state.client.as_deref() else {
        return missing_key_response();
    };

    let mut messages = body.messages;
    if messages.first().is_none_or(|m| m.role != Role::System) {
        messages.insert(0, ChatMessage::system(&*state.chat_system_prompt));
    }

    let upstream = match client.relay_chat(&messages).await {
        Ok(response) => response,
        Err(error) => {
            tracing::error!(%error, "Chat relay could not reach the gateway");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string());
        }
    };

    let turns = messages.len();
    let relayed = async_stream::stream! {
        let mut upstream = Box::pin(upstream.bytes_stream());
        let mut assembler = StreamAssembler::new();

        while let Some(chunk) = upstream.next().await {
            match chunk {
                Ok(bytes) => {
                    assembler.consume(&bytes);
                    yield Ok::<_, std::io::Error>(bytes);
                }
                Err(error) => {
                    assembler.fail();
                    tracing::warn!(%error, "Upstream chat stream failed mid-relay");
                    yield Err(std::io::Error::other(error));
                    break;
                }
            }
        }

        if assembler.state() == StreamState::Streaming {
            assembler.finish();
        }
        tracing::info!(
            turns,
            assembled_len = assembler.assembled().len(),
            skipped_frames = assembler.skipped_frames(),
            outcome = %assembler.state(),
            "Chat relay finished"
        );
    };

    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(relayed),
    )
        .into_response()
}
