use std::io::Write;
use std::path::Path;
use std::time::Instant;

use crate::errors::{CallError, ToolError};
use crate::fsutil::write_atomic;
use crate::invoke::ExternalCall;

use super::launcher::Invocation;
use super::options::{BenchmarkOptions, BenchmarkResults, BenchmarkSummary, RunResult};
use super::report::render_performance_report;

/// Check that the dataset and every configured executable exist. Nothing is launched
/// and no report is written when this fails.
///
/// # Errors
/// `DatasetNotFound` or `MissingExecutable` naming the first missing file.
pub fn preflight(opts: &BenchmarkOptions) -> Result<(), ToolError> {
    if !opts.dataset_path.exists() {
        return Err(ToolError::DatasetNotFound(opts.dataset_path.clone()));
    }
    for program in &opts.programs {
        let exe = opts.executable_path(program);
        if !exe.exists() {
            log::error!("benchmark: missing executable {}", exe.display());
            return Err(ToolError::MissingExecutable(exe));
        }
    }
    Ok(())
}

/// Time a single invocation. Any failure yields `None` and is logged, never propagated.
pub fn run_once<L>(launcher: &L, opts: &BenchmarkOptions, program: &str, processes: usize) -> RunResult
where
    L: ExternalCall<Invocation> + ?Sized,
{
    let exe = opts.executable_path(program);
    let inv = Invocation::mpi(&opts.launcher, &opts.process_flag, processes, &exe, opts.timeout());
    log::debug!("benchmark: launching `{}`", inv.display());
    let started = Instant::now();
    let outcome = launcher.call(&inv);
    let elapsed = started.elapsed();
    let elapsed = match outcome {
        Ok(_) => {
            log::info!(
                target: crate::logger::TIMINGS_TARGET,
                "program={program} processes={processes} elapsed_s={:.3}",
                elapsed.as_secs_f64()
            );
            Some(elapsed)
        }
        Err(CallError::Timeout(after)) => {
            log::warn!("benchmark: {program} with {processes} processes timed out after {}s", after.as_secs());
            None
        }
        Err(CallError::NonZeroExit { status, stderr }) => {
            log::warn!("benchmark: {program} with {processes} processes failed ({status}): {}", stderr.trim());
            None
        }
        Err(e) => {
            log::warn!("benchmark: {program} with {processes} processes: {e}");
            None
        }
    };
    RunResult { program: program.to_string(), processes, elapsed }
}

/// Run every (program, process count) combination in order. Failed combinations
/// are recorded as absent results and the sweep continues.
pub fn run_matrix<L, W>(launcher: &L, opts: &BenchmarkOptions, out: &mut W) -> Vec<RunResult>
where
    L: ExternalCall<Invocation> + ?Sized,
    W: Write + ?Sized,
{
    let mut runs = Vec::with_capacity(opts.programs.len() * opts.process_counts.len());
    for program in &opts.programs {
        let _ = writeln!(out, "\nTestando {program}...");
        for &procs in &opts.process_counts {
            let _ = write!(out, "  Executando com {procs} processo(s)... ");
            let _ = out.flush();
            let run = run_once(launcher, opts, program, procs);
            match run.elapsed {
                Some(d) => {
                    let _ = writeln!(out, "{:.2}s", d.as_secs_f64());
                }
                None => {
                    let _ = writeln!(out, "FALHOU");
                }
            }
            runs.push(run);
        }
    }
    runs
}

/// Full benchmark: preflight, sweep, aggregate, write report.
///
/// # Errors
/// Only preflight failures are returned; a report that cannot be written is logged
/// and reflected as `report_path: None`.
pub fn run_benchmark<L, W>(
    launcher: &L,
    opts: &BenchmarkOptions,
    out: &mut W,
) -> Result<BenchmarkSummary, ToolError>
where
    L: ExternalCall<Invocation> + ?Sized,
    W: Write + ?Sized,
{
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "BENCHMARK DE DESEMPENHO - PROCESSAMENTO PARALELO");
    let _ = writeln!(out, "{}", "=".repeat(60));
    preflight(opts)?;
    log::info!(
        "benchmark: programs={:?} process_counts={:?} timeout_s={}",
        opts.programs,
        opts.process_counts,
        opts.timeout_secs
    );

    let runs = run_matrix(launcher, opts, out);
    let results = BenchmarkResults::from_runs(&runs);
    let timestamp = chrono::Local::now().format("%d/%m/%Y %H:%M:%S").to_string();
    let text = render_performance_report(&results, &timestamp, &opts.system_description);
    let report_path = save_report(&opts.report_path, &text);
    if let Some(p) = &report_path {
        let _ = writeln!(out, "\nRelatório de desempenho salvo em: {}", p.display());
    }
    Ok(BenchmarkSummary { runs, results, report_path })
}

fn save_report(path: &Path, text: &str) -> Option<std::path::PathBuf> {
    match write_atomic(path, text) {
        Ok(()) => {
            log::info!("benchmark: report written to {}", path.display());
            Some(path.to_path_buf())
        }
        Err(e) => {
            log::error!("benchmark: could not write report {}: {e}", path.display());
            None
        }
    }
}
