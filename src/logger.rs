//! Programmatic log4rs setup.
//!
//! Everything goes to stderr. With a log directory configured, records are also
//! written to a rolling `app.log`, and the `songbench::timings` target is routed
//! to its own rolling `timings.log`.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use once_cell::sync::OnceCell;
use std::path::Path;

use crate::errors::ToolError;

pub const TIMINGS_TARGET: &str = "songbench::timings";

const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const CONSOLE_PATTERN: &str = "[{l}] {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;

static HANDLE: OnceCell<log4rs::Handle> = OnceCell::new();

#[must_use]
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    match level.unwrap_or("info").trim().to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn rolling(dir: &Path, stem: &str, keep: u32) -> Result<RollingFileAppender, ToolError> {
    let roller = FixedWindowRoller::builder()
        .build(&format!("{}", dir.join(format!("{stem}.{{}}.log")).display()), keep)
        .map_err(|e| ToolError::Config(format!("log roller: {e}")))?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
    RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
        .build(dir.join(format!("{stem}.log")), Box::new(policy))
        .map_err(ToolError::from)
}

/// Build the log4rs configuration without installing it.
///
/// # Errors
/// Fails if the log directory cannot be created or an appender cannot open its file.
pub fn build_config(dir: Option<&Path>, level: Option<&str>, retention: Option<usize>) -> Result<Config, ToolError> {
    let lvl = parse_level(level);
    let keep = u32::try_from(retention.unwrap_or(7).max(1)).unwrap_or(u32::MAX);
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    let mut builder = Config::builder().appender(Appender::builder().build("console", Box::new(console)));
    let mut root = Root::builder().appender("console");

    if let Some(dir) = dir {
        std::fs::create_dir_all(dir)?;
        builder = builder
            .appender(Appender::builder().build("app", Box::new(rolling(dir, "app", keep)?)))
            .appender(Appender::builder().build("timings", Box::new(rolling(dir, "timings", keep)?)))
            .logger(Logger::builder().appender("timings").additive(false).build(TIMINGS_TARGET, lvl));
        root = root.appender("app");
    }

    builder.build(root.build(lvl)).map_err(|e| ToolError::Config(format!("logging: {e}")))
}

/// Install (or replace) the process-wide logger.
///
/// # Errors
/// See [`build_config`]; also fails if another logger implementation is already installed.
pub fn configure_logging(dir: Option<&Path>, level: Option<&str>, retention: Option<usize>) -> Result<(), ToolError> {
    let config = build_config(dir, level, retention)?;
    if let Some(handle) = HANDLE.get() {
        handle.set_config(config);
        return Ok(());
    }
    let handle = log4rs::init_config(config).map_err(|e| ToolError::Config(format!("logging: {e}")))?;
    let _ = HANDLE.set(handle);
    Ok(())
}
