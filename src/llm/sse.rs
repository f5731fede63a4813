//! Line framing for `text/event-stream` bodies delivered in arbitrary chunks.

/// Stateful UTF-8 decoder that holds back an incomplete multi-byte tail until
/// the next chunk completes it.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Decode as much of `pending + chunk` as is complete. Invalid sequences
    /// become U+FFFD; an incomplete sequence at the end is kept for later.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);

        let mut decoded = String::with_capacity(self.pending.len());
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    decoded.push_str(text);
                    self.pending.clear();
                    return decoded;
                }
                Err(error) => {
                    let valid_up_to = error.valid_up_to();
                    decoded.push_str(&String::from_utf8_lossy(&self.pending[..valid_up_to]));
                    match error.error_len() {
                        Some(invalid_len) => {
                            decoded.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid_up_to + invalid_len);
                        }
                        None => {
                            self.pending.drain(..valid_up_to);
                            return decoded;
                        }
                    }
                }
            }
        }
    }

    /// Flush whatever is still pending; a truncated sequence decodes lossily.
    pub fn finish(&mut self) -> String {
        let tail = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        tail
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Accumulates decoded text and hands out complete `\n`-terminated lines.
/// At most one partial line is held between chunks.
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    decoder: Utf8StreamDecoder,
    buffer: String,
    // Start of the first line not yet handed out.
    consumed: usize,
}

impl SseLineBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            decoder: Utf8StreamDecoder::new(),
            buffer: String::new(),
            consumed: 0,
        }
    }

    pub fn push_chunk(&mut self, chunk: &[u8]) {
        self.compact();
        let text = self.decoder.decode(chunk);
        self.buffer.push_str(&text);
    }

    /// Next complete line without its terminator (`\n` or `\r\n`).
    pub fn next_line(&mut self) -> Option<String> {
        let unread = &self.buffer[self.consumed..];
        let boundary = unread.find('\n')?;
        let line = unread[..boundary].strip_suffix('\r').unwrap_or(&unread[..boundary]);
        let line = line.to_owned();
        self.consumed += boundary + 1;
        Some(line)
    }

    /// Drain the unterminated remainder once the transport has closed.
    pub fn take_remainder(&mut self) -> Option<String> {
        self.compact();
        let tail = self.decoder.finish();
        self.buffer.push_str(&tail);
        let mut rest = std::mem::take(&mut self.buffer);
        if rest.ends_with('\r') {
            rest.pop();
        }
        (!rest.is_empty()).then_some(rest)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.consumed = 0;
        self.decoder = Utf8StreamDecoder::new();
    }

    pub fn partial_len(&self) -> usize {
        self.buffer.len() - self.consumed
    }

    fn compact(&mut self) {
        if self.consumed > 0 {
            self.buffer.drain(..self.consumed);
            self.consumed = 0;
        }
    }
}
