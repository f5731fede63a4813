//! HTTP client for the OpenAI-compatible chat completions gateway.

use super::assembler::{Increment, StreamAssembler, StreamState};
use super::http_client::build_gateway_client;
use super::scrub::api_error;
use super::streaming::StreamSink;
use super::types::{ChatMessage, ChatRequest, ChatResponse};
use crate::config::LlmConfig;
use crate::error::LlmError;
use futures_util::{Stream, StreamExt};
use std::fmt::Display;
use std::pin::Pin;

pub type ChatStream = Pin<Box<dyn Stream<Item = Result<Increment, LlmError>> + Send + 'static>>;

/// Final state of a reply consumed through [`GatewayClient::stream_chat_into`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledReply {
    pub text: String,
    /// `false` when the connection closed before the terminator.
    pub done: bool,
}

pub struct GatewayClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    temperature: Option<f64>,
    cached_auth_header: String,
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GatewayClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(LlmError::Auth)?;

        Ok(Self {
            http: build_gateway_client(config),
            endpoint: config.chat_completions_url(),
            model: config.model.clone(),
            temperature: config.temperature,
            cached_auth_header: format!("Bearer {api_key}"),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request(&self, messages: &[ChatMessage], stream: bool) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            temperature: self.temperature,
            stream: stream.then_some(true),
        }
    }

    async fn send(&self, request: &ChatRequest) -> Result<reqwest::Response, LlmError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", &self.cached_auth_header)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error = api_error(response).await;
            tracing::warn!(%error, "Gateway rejected chat request");
            return Err(error);
        }

        Ok(response)
    }

    /// Start a streamed completion. Errors before the first byte (bad status,
    /// refused connection) surface here; later transport failures arrive as
    /// an `Err` item that ends the stream.
    pub async fn stream_chat(&self, messages: &[ChatMessage]) -> Result<ChatStream, LlmError> {
        tracing::debug!(model = %self.model, turns = messages.len(), "Opening chat stream");
        let response = self.send(&self.request(messages, true)).await?;
        Ok(assemble_byte_stream(response.bytes_stream()))
    }

    pub async fn stream_chat_into(
        &self,
        messages: &[ChatMessage],
        sink: &dyn StreamSink,
    ) -> Result<AssembledReply, LlmError> {
        let mut stream = self.stream_chat(messages).await?;
        let mut reply = AssembledReply::default();

        while let Some(increment) = stream.next().await {
            let increment = increment?;
            reply.text.push_str(&increment.appended);
            reply.done |= increment.done;
            sink.on_increment(&increment).await;
        }

        Ok(reply)
    }

    /// Single non-streamed exchange: one system prompt, one user message.
    pub async fn complete(&self, system_prompt: &str, user: &str) -> Result<String, LlmError> {
        let messages = [ChatMessage::system(system_prompt), ChatMessage::user(user)];
        let response = self.send(&self.request(&messages, false)).await?;
        let body: ChatResponse = response.json().await?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)
    }

    /// Open a streamed completion and hand back the raw response for relaying.
    pub async fn relay_chat(&self, messages: &[ChatMessage]) -> Result<reqwest::Response, LlmError> {
        self.send(&self.request(messages, true)).await
    }
}

/// Drive a [`StreamAssembler`] over a byte stream, yielding every non-empty
/// increment. A transport error ends the stream with [`LlmError::Transport`].
pub fn assemble_byte_stream<S, B, E>(bytes: S) -> ChatStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let stream = async_stream::stream! {
        let mut bytes = Box::pin(bytes);
        let mut assembler = StreamAssembler::new();

        while let Some(chunk) = bytes.next().await {
            match chunk {
                Ok(chunk) => {
                    let increment = assembler.consume(chunk.as_ref());
                    if !increment.is_empty() {
                        yield Ok(increment);
                    }
                    if assembler.is_done() {
                        break;
                    }
                }
                Err(error) => {
                    assembler.fail();
                    tracing::warn!(
                        %error,
                        assembled_len = assembler.assembled().len(),
                        "Chat stream transport failed"
                    );
                    yield Err(LlmError::Transport(error.to_string()));
                    break;
                }
            }
        }

        if assembler.state() == StreamState::Streaming {
            let tail = assembler.finish();
            if !tail.is_empty() {
                yield Ok(tail);
            }
            tracing::debug!("Chat stream closed without terminator");
        }
    };

    Box::pin(stream)
}
