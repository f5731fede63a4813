pub mod assembler;
pub mod client;
pub mod http_client;
pub mod scrub;
pub mod sse;
pub mod streaming;
pub mod types;

pub use assembler::{DATA_PREFIX, DONE_TOKEN, Increment, StreamAssembler, StreamState};
pub use client::{AssembledReply, ChatStream, GatewayClient, assemble_byte_stream};
pub use http_client::build_gateway_client;
pub use scrub::{api_error, sanitize_api_error, scrub_secret_patterns};
pub use sse::{SseLineBuffer, Utf8StreamDecoder};
pub use streaming::{CliStreamSink, NullStreamSink, StreamSink};
pub use types::{ChatMessage, Role};
