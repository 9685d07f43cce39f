//! Benchmark sweeps over MPI executables and lyric sentiment analysis through a
//! local text-generation backend.
pub mod benchmark;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fsutil;
pub mod invoke;
pub mod logger;
pub mod sentiment;


pub use config::AppConfig;
pub use errors::{CallError, ToolError};
pub use invoke::ExternalCall;
