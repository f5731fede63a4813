//! Pomodoro focus timer.
//!
//! The timer is driven by `tick` rather than a clock so callers decide the
//! cadence (one-second interval in the CLI, arbitrary jumps in tests).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

pub const FOCUS_MINUTES: u32 = 25;
pub const BREAK_MINUTES: u32 = 5;
pub const DEFAULT_TASK_DESCRIPTION: &str = "Focus session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum FocusPhase {
    Focus,
    Break,
}

impl FocusPhase {
    pub fn duration_secs(self) -> u32 {
        match self {
            Self::Focus => FOCUS_MINUTES * 60,
            Self::Break => BREAK_MINUTES * 60,
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Focus => Self::Break,
            Self::Break => Self::Focus,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionKind {
    Pomodoro,
}

/// A finished focus phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: Uuid,
    pub session_type: SessionKind,
    pub duration_minutes: u32,
    pub task_description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct FocusTimer {
    phase: FocusPhase,
    remaining_secs: u32,
    running: bool,
    task_description: String,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusTimer {
    pub fn new() -> Self {
        Self {
            phase: FocusPhase::Focus,
            remaining_secs: FocusPhase::Focus.duration_secs(),
            running: false,
            task_description: String::new(),
        }
    }

    pub fn phase(&self) -> FocusPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_task(&mut self, description: impl Into<String>) {
        self.task_description = description.into();
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Stop and rewind the current phase.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_secs = self.phase.duration_secs();
    }

    /// Switch phase explicitly; stops the timer.
    pub fn select_phase(&mut self, phase: FocusPhase) {
        self.phase = phase;
        self.reset();
    }

    /// Advance by `seconds`. Returns the finished session when a focus phase
    /// reaches zero. Overshoot does not carry into the next phase.
    pub fn tick(&mut self, seconds: u32, now: DateTime<Utc>) -> Option<FocusSession> {
        if !self.running {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(seconds);
        if self.remaining_secs > 0 {
            return None;
        }

        let finished = self.phase;
        self.running = false;
        self.phase = finished.next();
        self.remaining_secs = self.phase.duration_secs();
        tracing::info!(phase = %finished, "Focus timer phase complete");

        (finished == FocusPhase::Focus).then(|| FocusSession {
            id: Uuid::new_v4(),
            session_type: SessionKind::Pomodoro,
            duration_minutes: FOCUS_MINUTES,
            task_description: self.task_label(),
            completed: true,
            created_at: now,
        })
    }

    fn task_label(&self) -> String {
        let task = self.task_description.trim();
        if task.is_empty() {
            DEFAULT_TASK_DESCRIPTION.to_string()
        } else {
            task.to_string()
        }
    }

    /// `MM:SS` countdown.
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }
}
