use serde::{Deserialize, Serialize};
use tracing::Level;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// "error" | "warn" | "info" | "debug" | "trace"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ObservabilityConfig {
    /// `None` when `log_level` is not a known level name.
    pub fn parsed_level(&self) -> Option<Level> {
        self.log_level.parse::<Level>().ok()
    }

    /// Parsed level; unknown names fall back to INFO.
    pub fn level(&self) -> Level {
        self.parsed_level().unwrap_or(Level::INFO)
    }
}
