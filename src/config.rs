//! Layered configuration: CLI > environment > config file > defaults.
//!
//! The file layer is the first TOML file found among: the `--config` path,
//! `$SONGBENCH_CONFIG`, `./songbench.toml`, `<user config dir>/songbench.toml`.
//! Every section and key is optional; absent keys keep their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::benchmark::BenchmarkOptions;
use crate::errors::ToolError;
use crate::sentiment::SentimentOptions;

pub const CONFIG_FILE_NAME: &str = "songbench.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// When set, logs are also written to rolling files in this directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    pub level: String,
    pub retention: usize,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self { dir: None, level: "info".to_string(), retention: 7 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingOptions,
    pub benchmark: BenchmarkOptions,
    pub sentiment: SentimentOptions,
}

impl AppConfig {
    /// Parse a TOML document; missing keys fall back to defaults.
    ///
    /// # Errors
    /// `Config` if the document is not valid TOML for this schema.
    pub fn from_toml_str(s: &str) -> Result<Self, ToolError> {
        toml::from_str(s).map_err(|e| ToolError::Config(e.to_string()))
    }

    /// # Errors
    /// `Config` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ToolError> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| ToolError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&s).map_err(|e| ToolError::Config(format!("{}: {e}", path.display())))
    }

    /// # Errors
    /// `Config` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ToolError> {
        toml::to_string_pretty(self).map_err(|e| ToolError::Config(e.to_string()))
    }

    /// Apply environment overrides read through `get`.
    ///
    /// Recognized: `SONGBENCH_LOG_DIR`, `SONGBENCH_LOG_LEVEL`, `SONGBENCH_LOG_RETENTION`, `SONGBENCH_TIMEOUT_SECS`,
    /// `SONGBENCH_MAX_RECORDS`, `SONGBENCH_PACING_MS`, `OLLAMA_HOST`.
    pub fn apply_env<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = get("SONGBENCH_LOG_DIR") {
            self.logging.dir = Some(PathBuf::from(v));
        }
        if let Some(v) = get("SONGBENCH_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = get("SONGBENCH_LOG_RETENTION").and_then(|s| s.parse().ok()) {
            self.logging.retention = v;
        }
        if let Some(v) = get("SONGBENCH_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.benchmark.timeout_secs = v;
        }
        if let Some(v) = get("SONGBENCH_MAX_RECORDS").and_then(|s| s.parse().ok()) {
            self.sentiment.max_records = v;
        }
        if let Some(v) = get("SONGBENCH_PACING_MS").and_then(|s| s.parse().ok()) {
            self.sentiment.pacing_ms = v;
        }
        if let Some(v) = get("OLLAMA_HOST") {
            self.sentiment.backend.url = normalize_host(&v);
        }
    }
}

/// `OLLAMA_HOST` may be a bare `host:port`; give it a scheme.
fn normalize_host(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    }
}

/// Candidate config file locations in priority order.
#[must_use]
pub fn find_config_paths(cli_cfg: Option<&Path>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = vec![];
    if let Some(p) = cli_cfg {
        paths.push(p.to_path_buf());
    }
    if let Ok(p) = std::env::var("SONGBENCH_CONFIG") {
        paths.push(PathBuf::from(p));
    }
    if let Ok(cur) = std::env::current_dir() {
        paths.push(cur.join(CONFIG_FILE_NAME));
    }
    if let Some(dir) = dirs_next::config_dir() {
        paths.push(dir.join(CONFIG_FILE_NAME));
    }
    paths
}

/// Resolve the effective configuration from file and environment layers.
/// CLI overrides are applied afterwards by the caller.
///
/// # Errors
/// A `--config` path that does not exist, or any config file that fails to parse.
pub fn load_config(cli_cfg: Option<&Path>) -> Result<AppConfig, ToolError> {
    if let Some(p) = cli_cfg
        && !p.exists()
    {
        return Err(ToolError::Config(format!("config file not found: {}", p.display())));
    }
    let mut cfg = match find_config_paths(cli_cfg).into_iter().find(|p| p.is_file()) {
        Some(p) => {
            log::debug!("config: loading {}", p.display());
            AppConfig::from_file(&p)?
        }
        None => AppConfig::default(),
    };
    cfg.apply_env(|k| std::env::var(k).ok());
    Ok(cfg)
}
