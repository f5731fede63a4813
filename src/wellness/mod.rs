pub mod focus;
pub mod insights;
pub mod mood;

pub use focus::{FocusPhase, FocusSession, FocusTimer, SessionKind};
pub use insights::{DashboardStats, Insights, MoodTrend, TrendPoint, mood_trend};
pub use mood::{MoodLog, MoodPreset, MoodScore};

use crate::error::WellnessError;
use crate::journal::JournalEntry;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Exported wellness history, as read by `mindmate insights`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WellnessExport {
    #[serde(default)]
    pub mood_logs: Vec<MoodLog>,
    #[serde(default)]
    pub sessions: Vec<FocusSession>,
    #[serde(default)]
    pub journal_entries: Vec<JournalEntry>,
}

impl WellnessExport {
    pub fn from_json(raw: &str) -> Result<Self, WellnessError> {
        serde_json::from_str(raw).map_err(|error| WellnessError::Export(error.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, WellnessError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|error| WellnessError::Export(format!("{}: {error}", path.display())))?;
        Self::from_json(&raw)
    }
}
