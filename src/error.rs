use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `MindMate`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; CLI glue continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum MindmateError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── LLM gateway ─────────────────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Journal ─────────────────────────────────────────────────────────
    #[error("journal: {0}")]
    Journal(#[from] JournalError),

    // ── Wellness domain ─────────────────────────────────────────────────
    #[error("wellness: {0}")]
    Wellness(#[from] WellnessError),

    // ── HTTP gateway ────────────────────────────────────────────────────
    #[error("gateway: {0}")]
    Gateway(#[from] GatewayError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── LLM gateway errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    /// Upstream answered with a non-success status.
    #[error("gateway request failed ({status}): {message}")]
    Request { status: u16, message: String },

    /// Connection or body read failed mid-flight.
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("API key not configured (set MINDMATE_API_KEY or [llm] api_key)")]
    Auth,

    #[error("gateway returned no choices")]
    EmptyResponse,

    #[error("response decode failed: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

// ─── Journal errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal entry is empty")]
    EmptyEntry,

    #[error("analysis failed: {0}")]
    Analysis(#[from] LlmError),
}

// ─── Wellness errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum WellnessError {
    #[error("mood score {0} out of range (1-10)")]
    MoodOutOfRange(u8),

    #[error("invalid wellness export: {0}")]
    Export(String),
}

// ─── Gateway errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("refusing to bind to {0} without allow_public_bind")]
    PublicBind(String),

    #[error("bind failed: {0}")]
    Bind(#[from] std::io::Error),

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, MindmateError>;
