pub mod schema;

pub use schema::{
    AnalysisFallback, ChatConfig, Config, GatewayConfig, JournalConfig, LlmConfig,
    ObservabilityConfig,
};
