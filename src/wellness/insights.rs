use super::focus::FocusSession;
use super::mood::MoodLog;
use crate::journal::JournalEntry;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use strum::Display;

pub const INSIGHTS_WINDOW_DAYS: i64 = 30;
pub const DASHBOARD_WINDOW_DAYS: i64 = 7;
const TREND_POINTS: usize = 7;
const TREND_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MoodTrend {
    Improving,
    Stable,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub at: DateTime<Utc>,
    pub mood: u8,
}

fn average(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

/// Compare the two halves of the latest week of points.
pub fn mood_trend(points: &[TrendPoint]) -> MoodTrend {
    if points.len() < 2 {
        return MoodTrend::Stable;
    }

    let recent = &points[points.len().saturating_sub(TREND_POINTS)..];
    let (first, second) = recent.split_at(recent.len().div_ceil(2));
    let first_avg = average(first.iter().map(|p| f64::from(p.mood)));
    let second_avg = average(second.iter().map(|p| f64::from(p.mood)));

    if second_avg > first_avg + TREND_THRESHOLD {
        MoodTrend::Improving
    } else if second_avg < first_avg - TREND_THRESHOLD {
        MoodTrend::Declining
    } else {
        MoodTrend::Stable
    }
}

/// Thirty-day wellness overview.
#[derive(Debug, Clone, Serialize)]
pub struct Insights {
    pub avg_stress: f64,
    pub avg_energy: f64,
    /// Oldest first.
    pub trend_points: Vec<TrendPoint>,
    pub completed_sessions: usize,
    pub focus_hours: u32,
}

impl Insights {
    pub fn compute(logs: &[MoodLog], sessions: &[FocusSession], now: DateTime<Utc>) -> Self {
        let since = now - Duration::days(INSIGHTS_WINDOW_DAYS);

        let mut recent: Vec<&MoodLog> = logs.iter().filter(|l| l.created_at >= since).collect();
        recent.sort_by_key(|l| l.created_at);

        let completed: Vec<&FocusSession> = sessions
            .iter()
            .filter(|s| s.completed && s.created_at >= since)
            .collect();
        let focus_minutes: u32 = completed.iter().map(|s| s.duration_minutes).sum();

        Self {
            avg_stress: average(recent.iter().map(|l| f64::from(l.stress_level))),
            avg_energy: average(recent.iter().map(|l| f64::from(l.energy_level))),
            trend_points: recent
                .iter()
                .map(|l| TrendPoint {
                    at: l.created_at,
                    mood: l.mood_score.value(),
                })
                .collect(),
            completed_sessions: completed.len(),
            focus_hours: minutes_to_hours(focus_minutes),
        }
    }

    pub fn trend(&self) -> MoodTrend {
        mood_trend(&self.trend_points)
    }
}

fn minutes_to_hours(minutes: u32) -> u32 {
    (minutes + 30) / 60
}

/// Seven-day summary shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Rounded 1-10 average, 0 when nothing was logged.
    pub mood_average: u8,
    pub journal_entries: usize,
    pub focus_hours: u32,
}

impl DashboardStats {
    pub fn compute(
        logs: &[MoodLog],
        entries: &[JournalEntry],
        sessions: &[FocusSession],
        now: DateTime<Utc>,
    ) -> Self {
        let since = now - Duration::days(DASHBOARD_WINDOW_DAYS);

        let moods: Vec<u32> = logs
            .iter()
            .filter(|l| l.created_at >= since)
            .map(|l| u32::from(l.mood_score.value()))
            .collect();
        let mood_average = if moods.is_empty() {
            0
        } else {
            let count = u32::try_from(moods.len()).unwrap_or(u32::MAX);
            let total: u32 = moods.iter().sum();
            // Round half up; the average of 1-10 scores always fits in u8.
            u8::try_from((total * 2 + count) / (count * 2)).unwrap_or(u8::MAX)
        };

        let focus_minutes = sessions
            .iter()
            .filter(|s| s.created_at >= since)
            .map(|s| s.duration_minutes)
            .sum();

        Self {
            mood_average,
            journal_entries: entries.len(),
            focus_hours: minutes_to_hours(focus_minutes),
        }
    }
}
