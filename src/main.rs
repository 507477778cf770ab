//! cch-statusline - Claude Code Hub usage statistics for the terminal.
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use clap::Parser;
use std::process::ExitCode;

use cch_statusline::cli::{Cli, OutputFormat};
use cch_statusline::core::logging;
use cch_statusline::render::error::render_error;
use cch_statusline::storage::config::ResolvedConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(&logging::LogSettings::from_cli(&cli));

    // Errors are rendered with the CLI's own view of format and color.
    let format = cli
        .format
        .as_deref()
        .and_then(OutputFormat::from_arg)
        .unwrap_or_default();
    let no_color = cli.no_color;

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(code = e.error_code(), "{e}");
            eprintln!("{}", render_error(&e, format, no_color));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(cli: &Cli) -> cch_statusline::Result<()> {
    let mut config = ResolvedConfig::resolve(cli)?;
    config.no_color = config.no_color || !cch_statusline::util::env::should_use_color(false);

    tracing::debug!(
        url = %config.url,
        url_source = %config.sources.url,
        format = config.format.as_str(),
        format_source = %config.sources.format,
        watch = ?config.watch,
        "Resolved configuration"
    );

    cch_statusline::cli::run::execute(&config).await
}
