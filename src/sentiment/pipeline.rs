use std::io::{Read, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use crate::errors::ToolError;
use crate::fsutil::write_atomic;
use crate::invoke::ExternalCall;

use super::backend::{GenerateRequest, ListModels, select_model};
use super::classifier::Classifier;
use super::clean::clean_lyrics;
use super::dataset::{LyricRow, LyricRows};
use super::label::{Sentiment, SentimentTally};
use super::options::SentimentOptions;
use super::report::{render_console_summary, render_sentiment_report};

#[derive(Debug, Clone)]
pub struct SentimentSummary {
    pub model: String,
    pub processed: u64,
    pub skipped: u64,
    pub rows_scanned: u64,
    pub tally: SentimentTally,
    pub elapsed: Duration,
    /// `None` when the report could not be written.
    pub report_path: Option<PathBuf>,
}

/// Counters of one bounded scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCounts {
    pub processed: u64,
    pub skipped: u64,
    pub rows_scanned: u64,
    pub tally: SentimentTally,
}

/// Outcome of the backend handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelChoice {
    pub available: Vec<String>,
    pub model: String,
}

/// List the backend's models and pick one. A failed listing aborts the run.
///
/// # Errors
/// `BackendUnavailable` when the model listing call fails.
pub fn choose_model<B>(backend: &B, opts: &SentimentOptions) -> Result<ModelChoice, ToolError>
where
    B: ExternalCall<ListModels, Output = Vec<String>> + ?Sized,
{
    let available = backend.call(&ListModels).map_err(|e| ToolError::BackendUnavailable(e.to_string()))?;
    log::info!("sentiment: backend models available: {available:?}");
    let model = match &opts.backend.model {
        Some(forced) => forced.clone(),
        None => select_model(&available, &opts.backend.model_hint, &opts.backend.default_model),
    };
    Ok(ModelChoice { available, model })
}

/// `['a', 'b']`
fn model_list(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{n}'")).collect();
    format!("[{}]", quoted.join(", "))
}

/// Scan rows until `max_records` lyrics were classified or the input ends.
///
/// # Errors
/// Only I/O failures of the underlying reader.
pub fn scan<R, B, W>(
    rows: &mut LyricRows<R>,
    classifier: &Classifier<'_, B>,
    opts: &SentimentOptions,
    out: &mut W,
) -> Result<ScanCounts, ToolError>
where
    R: Read,
    B: ExternalCall<GenerateRequest, Output = String> + ?Sized,
    W: Write + ?Sized,
{
    let mut counts = ScanCounts::default();
    let max = opts.max_records as u64;
    while counts.processed < max {
        let Some(row) = rows.next_row()? else { break };
        counts.rows_scanned += 1;
        let LyricRow::Lyrics(raw) = row else {
            counts.skipped += 1;
            continue;
        };
        let text = clean_lyrics(&raw);
        if text.chars().count() < opts.min_chars {
            counts.skipped += 1;
            continue;
        }

        let label = classifier.classify(&text);
        counts.tally.record(label);
        counts.processed += 1;

        if opts.progress_every > 0 && counts.processed % opts.progress_every as u64 == 0 {
            let t = &counts.tally;
            let _ = writeln!(
                out,
                "Processadas {} músicas - {}: {}, {}: {}, {}: {}",
                counts.processed,
                Sentiment::Positive,
                t.positive,
                Sentiment::Neutral,
                t.neutral,
                Sentiment::Negative,
                t.negative
            );
            log::info!("sentiment: processed={} tally={t:?}", counts.processed);
        }
        if !opts.pacing().is_zero() {
            thread::sleep(opts.pacing());
        }
    }
    Ok(counts)
}

/// Full classifier run: handshake, bounded scan, console summary, report.
///
/// # Errors
/// `BackendUnavailable` if the handshake fails, `DatasetNotFound` if the dataset is missing,
/// `Csv` on read failures mid-scan. Report write failures are logged, not returned.
pub fn run_sentiment<B, W>(backend: &B, opts: &SentimentOptions, out: &mut W) -> Result<SentimentSummary, ToolError>
where
    B: ExternalCall<ListModels, Output = Vec<String>> + ExternalCall<GenerateRequest, Output = String> + ?Sized,
    W: Write + ?Sized,
{
    let started = Instant::now();
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "ANÁLISE DE SENTIMENTOS DAS LETRAS DO SPOTIFY");
    let _ = writeln!(out, "{}", "=".repeat(60));

    let ModelChoice { available, model } = match choose_model(backend, opts) {
        Ok(c) => c,
        Err(e) => {
            let _ = writeln!(out, "✗ Erro no backend: {e}");
            return Err(e);
        }
    };
    let _ = writeln!(out, "✓ Backend conectado");
    let _ = writeln!(out, "  Modelos disponíveis: {}", model_list(&available));
    let _ = writeln!(out, "  Usando modelo: {model}");

    let mut rows = LyricRows::open(&opts.dataset_path, opts.lyrics_field)?;
    let _ = writeln!(
        out,
        "\nProcessando até {} músicas do arquivo: {}\nIniciando análise...\n",
        opts.max_records,
        opts.dataset_path.display()
    );
    let classifier = Classifier::new(
        backend,
        model.clone(),
        opts.backend.temperature,
        opts.backend.num_predict,
        opts.max_prompt_chars,
    );
    let counts = scan(&mut rows, &classifier, opts, out)?;

    let mut summary = SentimentSummary {
        model,
        processed: counts.processed,
        skipped: counts.skipped,
        rows_scanned: counts.rows_scanned,
        tally: counts.tally,
        elapsed: Duration::ZERO,
        report_path: None,
    };
    let _ = write!(out, "{}", render_console_summary(&summary));

    let timestamp = chrono::Local::now().format("%d/%m/%Y %H:%M:%S").to_string();
    let text = render_sentiment_report(&summary, &timestamp, opts.neutral_threshold_pct);
    match write_atomic(&opts.report_path, &text) {
        Ok(()) => {
            log::info!("sentiment: report written to {}", opts.report_path.display());
            let _ = writeln!(out, "\n✓ Resultados salvos em: {}", opts.report_path.display());
            summary.report_path = Some(opts.report_path.clone());
        }
        Err(e) => {
            log::error!("sentiment: could not write report {}: {e}", opts.report_path.display());
            let _ = writeln!(out, "Erro ao salvar resultados: {e}");
        }
    }

    summary.elapsed = started.elapsed();
    let _ = writeln!(out, "Tempo de execução: {:.2} segundos", summary.elapsed.as_secs_f64());
    let _ = writeln!(out, "{}", "=".repeat(60));
    log::info!(
        target: crate::logger::TIMINGS_TARGET,
        "sentiment model={} processed={} skipped={} elapsed_s={:.3}",
        summary.model,
        summary.processed,
        summary.skipped,
        summary.elapsed.as_secs_f64()
    );
    Ok(summary)
}
