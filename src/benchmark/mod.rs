//! Wall-clock benchmark of external MPI executables across process counts.
mod launcher;
mod options;
mod report;
mod runner;

pub use launcher::{Invocation, ProcessLauncher, ProcessOutput};
pub use options::{BenchmarkOptions, BenchmarkResults, BenchmarkSummary, ProgramTimings, RunResult};
pub use report::render_performance_report;
pub use runner::{preflight, run_benchmark, run_matrix, run_once};
