use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Instructions sent with every entry; must ask for the JSON analysis shape
    #[serde(default = "default_analysis_prompt")]
    pub system_prompt: String,
    /// Title used when an entry is saved without one
    #[serde(default = "default_title")]
    pub default_title: String,
    /// Analysis substituted when the model reply is not valid JSON
    #[serde(default)]
    pub fallback: AnalysisFallback,
}

fn default_analysis_prompt() -> String {
    "You are an AI journal analyzer for mental wellness. Analyze the journal entry and provide:\n\
     1. Overall emotional tone (positive, neutral, negative, mixed)\n\
     2. Detected emotions (joy, sadness, stress, anxiety, calm, etc.)\n\
     3. Sentiment score from -1 (very negative) to 1 (very positive)\n\
     4. Brief supportive insights (2-3 sentences)\n\
     5. Suggested wellness actions\n\n\
     Respond in JSON format: { \"tone\": string, \"emotions\": string[], \
     \"sentiment_score\": number, \"insights\": string, \"suggestions\": string[] }"
        .into()
}

fn default_title() -> String {
    "Untitled Entry".into()
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_analysis_prompt(),
            default_title: default_title(),
            fallback: AnalysisFallback::default(),
        }
    }
}

/// Product policy for unparseable analysis replies. The raw reply always
/// becomes the `insights` text; everything else comes from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFallback {
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_emotions")]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub sentiment_score: f64,
    #[serde(default = "default_suggestions")]
    pub suggestions: Vec<String>,
}

fn default_tone() -> String {
    "neutral".into()
}

fn default_emotions() -> Vec<String> {
    vec!["reflective".into()]
}

fn default_suggestions() -> Vec<String> {
    vec!["Continue journaling regularly".into()]
}

impl Default for AnalysisFallback {
    fn default() -> Self {
        Self {
            tone: default_tone(),
            emotions: default_emotions(),
            sentiment_score: 0.0,
            suggestions: default_suggestions(),
        }
    }
}

impl AnalysisFallback {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-1.0..=1.0).contains(&self.sentiment_score) {
            return Err(ConfigError::Validation(format!(
                "journal.fallback.sentiment_score {} outside -1.0..=1.0",
                self.sentiment_score
            )));
        }
        Ok(())
    }
}
