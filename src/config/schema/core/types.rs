use super::super::{GatewayConfig, JournalConfig, LlmConfig, ObservabilityConfig};
use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub journal: JournalConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ── Companion chat ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// System prompt prepended to every companion conversation
    #[serde(default = "default_chat_system_prompt")]
    pub system_prompt: String,
}

fn default_chat_system_prompt() -> String {
    "You are MindMate, a warm and supportive mental wellness companion. \
     Listen carefully, validate feelings, and offer gentle, practical coping ideas. \
     You are not a therapist; encourage professional help when someone is in crisis."
        .into()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_chat_system_prompt(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());

        Self {
            config_path: home.join(".mindmate").join("config.toml"),
            llm: LlmConfig::default(),
            chat: ChatConfig::default(),
            journal: JournalConfig::default(),
            gateway: GatewayConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Reject settings the runtime cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Validation("llm.model must not be empty".into()));
        }
        if let Some(temperature) = self.llm.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            return Err(ConfigError::Validation(format!(
                "llm.temperature {temperature} outside 0.0-2.0"
            )));
        }
        if self.llm.timeout_secs == 0 || self.gateway.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeouts must be greater than zero".into(),
            ));
        }
        self.journal.fallback.validate()?;
        Ok(())
    }
}
