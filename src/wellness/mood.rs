use crate::error::WellnessError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MoodScore(u8);

impl MoodScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(score: u8) -> Result<Self, WellnessError> {
        if (Self::MIN..=Self::MAX).contains(&score) {
            Ok(Self(score))
        } else {
            Err(WellnessError::MoodOutOfRange(score))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// 1 (calm) to 5 (very stressed); inverse of mood.
    pub fn stress_level(self) -> u8 {
        (12 - self.0) / 2
    }

    /// 1 (drained) to 5 (energized).
    pub fn energy_level(self) -> u8 {
        self.0.div_ceil(2)
    }
}

impl TryFrom<u8> for MoodScore {
    type Error = WellnessError;

    fn try_from(score: u8) -> Result<Self, Self::Error> {
        Self::new(score)
    }
}

impl From<MoodScore> for u8 {
    fn from(score: MoodScore) -> Self {
        score.0
    }
}

/// One-tap choices offered by the mood selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum MoodPreset {
    #[strum(serialize = "Very Bad")]
    VeryBad,
    Bad,
    Okay,
    Good,
    Great,
}

impl MoodPreset {
    pub fn score(self) -> MoodScore {
        MoodScore(match self {
            Self::VeryBad => 1,
            Self::Bad => 3,
            Self::Okay => 5,
            Self::Good => 7,
            Self::Great => 10,
        })
    }

    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodLog {
    pub id: Uuid,
    pub mood_score: MoodScore,
    pub stress_level: u8,
    pub energy_level: u8,
    pub created_at: DateTime<Utc>,
}

impl MoodLog {
    pub fn record(score: MoodScore, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            mood_score: score,
            stress_level: score.stress_level(),
            energy_level: score.energy_level(),
            created_at: at,
        }
    }
}
