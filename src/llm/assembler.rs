//! Incremental assembly of a streamed chat reply.
//!
//! The gateway answers with `data: <json>` lines; each JSON payload carries a
//! short text fragment at `choices[0].delta.content`, and `data: [DONE]` ends
//! the reply. Bytes arrive in arbitrary pieces, so lines and even UTF-8
//! characters can be split across chunks.

use super::sse::SseLineBuffer;
use super::types::ChatCompletionChunk;
use strum::Display;

pub const DATA_PREFIX: &str = "data: ";
pub const DONE_TOKEN: &str = "[DONE]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum StreamState {
    Streaming,
    /// Terminator seen.
    Done,
    /// Transport closed before the terminator.
    Closed,
    /// Transport failed.
    Failed,
}

/// Text appended by one `consume` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Increment {
    pub appended: String,
    pub done: bool,
}

impl Increment {
    pub fn is_empty(&self) -> bool {
        self.appended.is_empty() && !self.done
    }
}

/// Not reentrant: one chunk at a time, in arrival order.
#[derive(Debug)]
pub struct StreamAssembler {
    lines: SseLineBuffer,
    assembled: String,
    state: StreamState,
    skipped_frames: usize,
}

impl Default for StreamAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamAssembler {
    pub fn new() -> Self {
        Self {
            lines: SseLineBuffer::new(),
            assembled: String::new(),
            state: StreamState::Streaming,
            skipped_frames: 0,
        }
    }

    pub fn consume(&mut self, chunk: &[u8]) -> Increment {
        if self.state != StreamState::Streaming {
            return self.terminal_increment();
        }

        self.lines.push_chunk(chunk);

        let mut appended = String::new();
        while let Some(line) = self.lines.next_line() {
            self.process_frame(&line, &mut appended);
            if self.state == StreamState::Done {
                self.lines.clear();
                break;
            }
        }

        Increment {
            appended,
            done: self.state == StreamState::Done,
        }
    }

    /// Transport closed. A trailing line without `\n` still counts as a frame.
    pub fn finish(&mut self) -> Increment {
        if self.state != StreamState::Streaming {
            return self.terminal_increment();
        }

        let mut appended = String::new();
        if let Some(line) = self.lines.take_remainder() {
            self.process_frame(&line, &mut appended);
        }
        if self.state == StreamState::Streaming {
            self.state = StreamState::Closed;
        }

        Increment {
            appended,
            done: self.state == StreamState::Done,
        }
    }

    /// Transport failed; the assembled text is kept for inspection.
    pub fn fail(&mut self) {
        if self.state == StreamState::Streaming {
            self.state = StreamState::Failed;
            self.lines.clear();
        }
    }

    /// Start over for a new conversation turn.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn assembled(&self) -> &str {
        &self.assembled
    }

    pub fn into_assembled(self) -> String {
        self.assembled
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == StreamState::Done
    }

    pub fn skipped_frames(&self) -> usize {
        self.skipped_frames
    }

    fn terminal_increment(&self) -> Increment {
        Increment {
            appended: String::new(),
            done: self.state == StreamState::Done,
        }
    }

    fn process_frame(&mut self, line: &str, appended: &mut String) {
        // Blank keep-alive lines, comments and `event:` fields are expected.
        let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
            return;
        };
        let payload = payload.trim();

        if payload == DONE_TOKEN {
            self.state = StreamState::Done;
            return;
        }

        let chunk = match serde_json::from_str::<ChatCompletionChunk>(payload) {
            Ok(chunk) => chunk,
            Err(error) => {
                self.skipped_frames += 1;
                tracing::debug!(%error, "Skipping stream frame with malformed JSON");
                return;
            }
        };

        let Some(text) = chunk.into_delta_text() else {
            self.skipped_frames += 1;
            tracing::debug!("Skipping stream frame without delta content");
            return;
        };

        if !text.is_empty() {
            appended.push_str(&text);
            self.assembled.push_str(&text);
        }
    }
}
