use clap::{Args, Parser, Subcommand};
use songbench::cli::{self as prog_cli, Command, Overrides};
use songbench::{config, logger};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "songbench", version, about = "MPI benchmark sweeps and lyric sentiment analysis", long_about = None)]
struct Cli {
    /// Path to a config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Also write rolling log files to this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// error|warn|info|debug|trace
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct PathArgs {
    /// Input CSV dataset
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// Where to write the text report
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Run every configured MPI program at every process count and write a timing report")]
    Benchmark {
        /// Per-invocation timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        #[command(flatten)]
        paths: PathArgs,
    },
    #[command(about = "Classify lyrics with a local Ollama model and write a sentiment report")]
    Sentiment {
        /// Number of lyrics to classify
        #[arg(long)]
        max_records: Option<usize>,
        /// Pause between backend requests, in milliseconds
        #[arg(long)]
        pacing_ms: Option<u64>,
        /// Use this model instead of picking one from the backend's list
        #[arg(long)]
        model: Option<String>,
        /// Backend base URL (e.g. http://localhost:11434)
        #[arg(long)]
        backend_url: Option<String>,
        #[command(flatten)]
        paths: PathArgs,
    },
    #[command(about = "Print the effective configuration as TOML")]
    Config,
}

fn split(cli: Cli) -> (Command, Overrides, Option<PathBuf>) {
    let mut o = Overrides { log_dir: cli.log_dir, log_level: cli.log_level, ..Overrides::default() };
    let cmd = match cli.command {
        Commands::Benchmark { timeout_secs, paths } => {
            o.timeout_secs = timeout_secs;
            o.dataset = paths.dataset;
            o.report = paths.report;
            Command::Benchmark
        }
        Commands::Sentiment { max_records, pacing_ms, model, backend_url, paths } => {
            o.max_records = max_records;
            o.pacing_ms = pacing_ms;
            o.model = model;
            o.backend_url = backend_url;
            o.dataset = paths.dataset;
            o.report = paths.report;
            Command::Sentiment
        }
        Commands::Config => Command::ShowConfig,
    };
    (cmd, o, cli.config)
}

fn main() {
    let (cmd, overrides, cfg_path) = split(Cli::parse());
    let mut cfg = match config::load_config(cfg_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    overrides.apply(&cmd, &mut cfg);
    if let Err(e) = logger::configure_logging(
        cfg.logging.dir.as_deref(),
        Some(cfg.logging.level.as_str()),
        Some(cfg.logging.retention),
    ) {
        eprintln!("warning: logging disabled: {e}");
    }

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = prog_cli::run(cmd, &cfg, &mut stdout) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
