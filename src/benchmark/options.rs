use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkOptions {
    pub programs: Vec<String>,
    pub process_counts: Vec<usize>,
    pub timeout_secs: u64,
    /// MPI launcher binary, e.g. `mpiexec` or `mpirun`.
    pub launcher: String,
    pub process_flag: String,
    pub exe_dir: PathBuf,
    pub exe_extension: String,
    /// Must exist before any run; the MPI programs read it.
    pub dataset_path: PathBuf,
    pub report_path: PathBuf,
    pub system_description: String,
}

impl Default for BenchmarkOptions {
    fn default() -> Self {
        Self {
            programs: vec!["word_count_mpi".to_string(), "artist_count_mpi".to_string()],
            process_counts: vec![1, 2, 4, 8],
            timeout_secs: 300,
            launcher: "mpiexec".to_string(),
            process_flag: "-n".to_string(),
            exe_dir: PathBuf::from("exe"),
            exe_extension: ".exe".to_string(),
            dataset_path: PathBuf::from("data/spotify_millsongdata.csv"),
            report_path: PathBuf::from("results/performance_analysis.txt"),
            system_description: "Windows com MS-MPI".to_string(),
        }
    }
}

impl BenchmarkOptions {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Path of the executable for `program`, e.g. `exe/word_count_mpi.exe`.
    #[must_use]
    pub fn executable_path(&self, program: &str) -> PathBuf {
        self.exe_dir.join(format!("{program}{}", self.exe_extension))
    }
}

/// Outcome of one (program, process count) invocation. `elapsed` is `None` on failure or timeout.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub program: String,
    pub processes: usize,
    pub elapsed: Option<Duration>,
}

/// Successful timings of one program, keyed by process count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramTimings {
    pub program: String,
    pub timings: BTreeMap<usize, f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkResults {
    pub programs: Vec<ProgramTimings>,
}

impl BenchmarkResults {
    /// Group runs by program in first-seen order, keeping only runs that produced a time.
    /// Programs without a single successful run are left out.
    #[must_use]
    pub fn from_runs(runs: &[RunResult]) -> Self {
        let mut programs: Vec<ProgramTimings> = Vec::new();
        for run in runs {
            let Some(elapsed) = run.elapsed else { continue };
            let idx = match programs.iter().position(|p| p.program == run.program) {
                Some(i) => i,
                None => {
                    programs.push(ProgramTimings { program: run.program.clone(), ..Default::default() });
                    programs.len() - 1
                }
            };
            programs[idx].timings.insert(run.processes, elapsed.as_secs_f64());
        }
        Self { programs }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.programs.iter().map(|p| p.timings.len()).sum()
    }
}

#[derive(Debug)]
pub struct BenchmarkSummary {
    pub runs: Vec<RunResult>,
    pub results: BenchmarkResults,
    /// `None` when the report could not be written.
    pub report_path: Option<PathBuf>,
}
