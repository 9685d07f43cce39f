mod command;
mod runner;

pub use command::{Command, Overrides};
pub use runner::run;
