use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentOptions {
    pub dataset_path: PathBuf,
    pub report_path: PathBuf,
    /// 0-based column holding the lyric text.
    pub lyrics_field: usize,
    /// Stop after this many classified records.
    pub max_records: usize,
    /// Cleaned lyrics shorter than this (in chars) are skipped.
    pub min_chars: usize,
    /// Lyrics are cut to this many chars before being embedded in the prompt.
    pub max_prompt_chars: usize,
    pub pacing_ms: u64,
    pub progress_every: usize,
    /// Neutral share (percent) above which the report flags many ambiguous lyrics.
    pub neutral_threshold_pct: f64,
    pub backend: BackendOptions,
}

impl Default for SentimentOptions {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/spotify_millsongdata.csv"),
            report_path: PathBuf::from("results/sentiment_analysis_results.txt"),
            lyrics_field: 3,
            max_records: 20,
            min_chars: 20,
            max_prompt_chars: 1000,
            pacing_ms: 300,
            progress_every: 10,
            neutral_threshold_pct: 40.0,
            backend: BackendOptions::default(),
        }
    }
}

impl SentimentOptions {
    #[must_use]
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendOptions {
    pub url: String,
    /// First listed model whose name contains this (case-insensitive) is used.
    pub model_hint: String,
    pub default_model: String,
    /// Skip discovery and use this model name as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub temperature: f32,
    pub num_predict: u32,
    pub request_timeout_secs: u64,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            url: "http://localhost:11434".to_string(),
            model_hint: "llama".to_string(),
            default_model: "llama3:latest".to_string(),
            model: None,
            temperature: 0.1,
            num_predict: 5,
            request_timeout_secs: 120,
        }
    }
}
