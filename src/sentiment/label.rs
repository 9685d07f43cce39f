use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Report order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positiva",
            Sentiment::Neutral => "Neutra",
            Sentiment::Negative => "Negativa",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a free-text model reply onto one of the three labels.
///
/// Positive wins when both words appear; anything unrecognized is neutral.
#[must_use]
pub fn normalize_reply(reply: &str) -> Sentiment {
    let r = reply.trim().to_lowercase();
    if r.contains("positiva") || r.contains("positive") {
        Sentiment::Positive
    } else if r.contains("negativa") || r.contains("negative") {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentTally {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

impl SentimentTally {
    pub fn record(&mut self, s: Sentiment) {
        match s {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }

    #[must_use]
    pub fn count(&self, s: Sentiment) -> u64 {
        match s {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.positive + self.neutral + self.negative
    }

    /// Share of `s` in percent; 0 when nothing was tallied.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self, s: Sentiment) -> f64 {
        let total = self.total();
        if total == 0 { 0.0 } else { self.count(s) as f64 / total as f64 * 100.0 }
    }
}
