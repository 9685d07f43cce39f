//! Lyric sentiment classification through a local text-generation backend.
mod backend;
mod classifier;
mod clean;
mod dataset;
mod label;
mod options;
mod pipeline;
mod report;

pub use backend::{GenerateRequest, ListModels, OllamaClient, select_model};
pub use classifier::{Classifier, build_prompt, truncate_lyrics};
pub use clean::clean_lyrics;
pub use dataset::{LyricRow, LyricRows, extract_lyrics_from_line};
pub use label::{Sentiment, SentimentTally, normalize_reply};
pub use options::{BackendOptions, SentimentOptions};
pub use pipeline::{ModelChoice, ScanCounts, SentimentSummary, choose_model, run_sentiment, scan};
pub use report::{interpretation, render_console_summary, render_sentiment_report};
