use super::assembler::Increment;
use std::future::Future;
use std::io::Write;
use std::pin::Pin;
use std::sync::Arc;

/// Receives each non-empty increment as a streamed reply grows.
pub trait StreamSink: Send + Sync {
    fn on_increment<'a>(
        &'a self,
        increment: &'a Increment,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}

#[derive(Debug, Default)]
pub struct NullStreamSink;

impl StreamSink for NullStreamSink {
    fn on_increment<'a>(
        &'a self,
        _increment: &'a Increment,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async {})
    }
}

/// Writes appended text to stdout as it arrives.
pub struct CliStreamSink {
    writer: Arc<dyn Fn(&str) + Send + Sync>,
}

impl CliStreamSink {
    pub fn new() -> Self {
        Self {
            writer: Arc::new(|text| {
                let mut stdout = std::io::stdout().lock();
                let _ = stdout.write_all(text.as_bytes());
                let _ = stdout.flush();
            }),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_writer(writer: Arc<dyn Fn(&str) + Send + Sync>) -> Self {
        Self { writer }
    }
}

impl Default for CliStreamSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamSink for CliStreamSink {
    fn on_increment<'a>(
        &'a self,
        increment: &'a Increment,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            if !increment.appended.is_empty() {
                (self.writer)(&increment.appended);
            }
        })
    }
}
