//! CLI argument parsing and the run driver.

pub mod args;
pub mod run;
pub mod watch;

pub use args::{Cli, OutputFormat};
