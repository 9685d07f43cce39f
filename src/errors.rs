use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Executable not found: {}", .0.display())]
    MissingExecutable(PathBuf),

    #[error("Dataset not found: {}", .0.display())]
    DatasetNotFound(PathBuf),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl From<std::io::Error> for ToolError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Failure of a single external call (child process or backend request).
#[derive(Debug, Error)]
pub enum CallError {
    #[error("spawn failed: {0}")]
    Spawn(String),

    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("{status}: {stderr}")]
    NonZeroExit {
        /// Rendered exit status: the code, or the signal when the child was killed.
        status: String,
        stderr: String,
    },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for CallError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() { Self::Decode(e.to_string()) } else { Self::Http(e.to_string()) }
    }
}
