use std::io::Write;

use crate::benchmark::{ProcessLauncher, run_benchmark};
use crate::config::AppConfig;
use crate::errors::ToolError;
use crate::sentiment::{OllamaClient, run_sentiment};

use super::command::Command;

/// Execute `cmd` against the resolved configuration, writing user-facing output to `out`.
///
/// # Errors
/// Whatever the selected pipeline reports as fatal.
pub fn run<W: Write + ?Sized>(cmd: Command, cfg: &AppConfig, out: &mut W) -> Result<(), ToolError> {
    match cmd {
        Command::Benchmark => {
            let summary = run_benchmark(&ProcessLauncher, &cfg.benchmark, out)?;
            log::info!(
                "benchmark: {} run(s), {} row(s) reported",
                summary.runs.len(),
                summary.results.row_count()
            );
            Ok(())
        }
        Command::Sentiment => {
            let client = OllamaClient::new(&cfg.sentiment.backend)
                .map_err(|e| ToolError::BackendUnavailable(e.to_string()))?;
            log::debug!("sentiment: backend at {}", client.base_url());
            let summary = run_sentiment(&client, &cfg.sentiment, out)?;
            log::info!(
                "sentiment: model={} processed={} skipped={} in {:.1}s",
                summary.model,
                summary.processed,
                summary.skipped,
                summary.elapsed.as_secs_f64()
            );
            Ok(())
        }
        Command::ShowConfig => {
            writeln!(out, "{}", cfg.to_toml_string()?)?;
            Ok(())
        }
    }
}
