mod core;
mod gateway;
mod journal;
mod llm;
mod observability;

pub use core::{ChatConfig, Config};
pub use gateway::GatewayConfig;
pub use journal::{AnalysisFallback, JournalConfig};
pub use llm::LlmConfig;
pub use observability::ObservabilityConfig;
