//! Companion chat: conversation history with a live-updating assistant turn.

use crate::config::ChatConfig;
use crate::error::LlmError;
use crate::llm::{ChatMessage, GatewayClient, StreamSink};
use futures_util::StreamExt;

#[derive(Debug, Clone)]
pub struct Conversation {
    system_prompt: String,
    turns: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            turns: Vec::new(),
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(config.system_prompt.clone())
    }

    /// User and assistant turns, oldest first. Excludes the system prompt.
    pub fn turns(&self) -> &[ChatMessage] {
        &self.turns
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    fn request_messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.turns.len() + 1);
        messages.push(ChatMessage::system(self.system_prompt.clone()));
        messages.extend(self.turns.iter().cloned());
        messages
    }

    /// Send one user message and stream the reply into the history.
    ///
    /// Blank input is ignored. While the reply streams, the last turn is an
    /// assistant placeholder holding the text assembled so far. If the
    /// transport fails, the placeholder is removed and the user turn kept.
    pub async fn send(
        &mut self,
        input: &str,
        client: &GatewayClient,
        sink: &dyn StreamSink,
    ) -> Result<Option<String>, LlmError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        self.turns.push(ChatMessage::user(input));
        let mut stream = client.stream_chat(&self.request_messages()).await?;

        self.turns.push(ChatMessage::assistant(String::new()));
        let placeholder = self.turns.len() - 1;

        while let Some(increment) = stream.next().await {
            let increment = match increment {
                Ok(increment) => increment,
                Err(error) => {
                    self.turns.truncate(placeholder);
                    return Err(error);
                }
            };
            self.turns[placeholder]
                .content
                .push_str(&increment.appended);
            sink.on_increment(&increment).await;
        }

        let reply = self.turns[placeholder].content.clone();
        tracing::debug!(
            reply_len = reply.len(),
            turns = self.turns.len(),
            "Assistant reply complete"
        );
        Ok(Some(reply))
    }
}
