use std::path::PathBuf;

use crate::config::AppConfig;

pub enum Command {
    Benchmark,
    Sentiment,
    /// Print the effective configuration as TOML.
    ShowConfig,
}

/// Command-line values that take precedence over file and environment settings.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_records: Option<usize>,
    pub pacing_ms: Option<u64>,
    pub model: Option<String>,
    pub backend_url: Option<String>,
    pub dataset: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

impl Overrides {
    /// Fold these overrides into `cfg`. `dataset` and `report` target the section of `cmd`.
    pub fn apply(&self, cmd: &Command, cfg: &mut AppConfig) {
        if let Some(d) = &self.log_dir {
            cfg.logging.dir = Some(d.clone());
        }
        if let Some(l) = &self.log_level {
            cfg.logging.level = l.clone();
        }
        if let Some(t) = self.timeout_secs {
            cfg.benchmark.timeout_secs = t;
        }
        if let Some(n) = self.max_records {
            cfg.sentiment.max_records = n;
        }
        if let Some(ms) = self.pacing_ms {
            cfg.sentiment.pacing_ms = ms;
        }
        if let Some(m) = &self.model {
            cfg.sentiment.backend.model = Some(m.clone());
        }
        if let Some(u) = &self.backend_url {
            cfg.sentiment.backend.url = u.clone();
        }
        match cmd {
            Command::Benchmark => {
                if let Some(p) = &self.dataset {
                    cfg.benchmark.dataset_path = p.clone();
                }
                if let Some(p) = &self.report {
                    cfg.benchmark.report_path = p.clone();
                }
            }
            Command::Sentiment => {
                if let Some(p) = &self.dataset {
                    cfg.sentiment.dataset_path = p.clone();
                }
                if let Some(p) = &self.report {
                    cfg.sentiment.report_path = p.clone();
                }
            }
            Command::ShowConfig => {}
        }
    }
}
