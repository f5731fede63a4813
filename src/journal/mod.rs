//! Journal entries and their AI wellness analysis.

use crate::config::{AnalysisFallback, JournalConfig};
use crate::error::JournalError;
use crate::llm::GatewayClient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_ENTRY_TITLE: &str = "Untitled Entry";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalAnalysis {
    pub tone: String,
    pub emotions: Vec<String>,
    /// -1.0 (very negative) to 1.0 (very positive)
    pub sentiment_score: f64,
    pub insights: String,
    pub suggestions: Vec<String>,
}

impl JournalAnalysis {
    fn fallback(raw: &str, fallback: &AnalysisFallback) -> Self {
        Self {
            tone: fallback.tone.clone(),
            emotions: fallback.emotions.clone(),
            sentiment_score: fallback.sentiment_score,
            insights: raw.to_string(),
            suggestions: fallback.suggestions.clone(),
        }
    }
}

/// Model replies sometimes omit fields; missing ones come from the fallback.
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    tone: Option<String>,
    emotions: Option<Vec<String>>,
    sentiment_score: Option<f64>,
    insights: Option<String>,
    suggestions: Option<Vec<String>>,
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse the model's analysis reply. Anything that is not a JSON object
/// yields the fallback analysis with the raw reply as `insights`.
///
/// Fields missing from a JSON reply come from the fallback, except
/// `insights`, which the fallback does not carry and stays empty.
pub fn parse_analysis(raw: &str, fallback: &AnalysisFallback) -> JournalAnalysis {
    let parsed = match serde_json::from_str::<RawAnalysis>(strip_code_fence(raw)) {
        Ok(parsed) => parsed,
        Err(error) => {
            tracing::debug!(%error, "Analysis reply is not JSON; using fallback");
            return JournalAnalysis::fallback(raw, fallback);
        }
    };

    let sentiment_score = parsed
        .sentiment_score
        .filter(|score| score.is_finite())
        .map_or(fallback.sentiment_score, |score| score.clamp(-1.0, 1.0));

    JournalAnalysis {
        tone: parsed.tone.unwrap_or_else(|| fallback.tone.clone()),
        emotions: parsed.emotions.unwrap_or_else(|| fallback.emotions.clone()),
        sentiment_score,
        insights: parsed.insights.unwrap_or_default(),
        suggestions: parsed
            .suggestions
            .unwrap_or_else(|| fallback.suggestions.clone()),
    }
}

pub struct JournalAnalyzer<'a> {
    client: &'a GatewayClient,
    config: &'a JournalConfig,
}

impl<'a> JournalAnalyzer<'a> {
    pub fn new(client: &'a GatewayClient, config: &'a JournalConfig) -> Self {
        Self { client, config }
    }

    pub async fn analyze(&self, content: &str) -> Result<JournalAnalysis, JournalError> {
        if content.trim().is_empty() {
            return Err(JournalError::EmptyEntry);
        }

        tracing::info!(content_len = content.len(), "Analyzing journal entry");
        let raw = self
            .client
            .complete(&self.config.system_prompt, content)
            .await?;
        Ok(parse_analysis(&raw, &self.config.fallback))
    }

    /// Analyze `content` and wrap it as a dated entry.
    pub async fn create_entry(
        &self,
        title: Option<&str>,
        content: &str,
    ) -> Result<JournalEntry, JournalError> {
        let analysis = self.analyze(content).await?;
        Ok(JournalEntry::build(
            title,
            content,
            analysis,
            &self.config.default_title,
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub analysis: JournalAnalysis,
    pub sentiment_score: f64,
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(title: Option<&str>, content: &str, analysis: JournalAnalysis) -> Self {
        Self::build(title, content, analysis, DEFAULT_ENTRY_TITLE)
    }

    fn build(
        title: Option<&str>,
        content: &str,
        analysis: JournalAnalysis,
        default_title: &str,
    ) -> Self {
        let title = title
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or(default_title);

        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            sentiment_score: analysis.sentiment_score,
            analysis,
            created_at: Utc::now(),
        }
    }
}
