//! The login, fetch and render pipeline behind every invocation.

use crate::cli::args::OutputFormat;
use crate::cli::watch;
use crate::core::client::HubClient;
use crate::core::models::NormalizedStats;
use crate::core::stats::StatsAggregator;
use crate::error::Result;
use crate::render::{self, Warning, compute_warnings};
use crate::storage::config::ResolvedConfig;

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct Frame {
    pub stats: NormalizedStats,
    /// Empty for JSON output.
    pub warnings: Vec<Warning>,
    pub output: String,
}

/// Execute a one-shot or watch-mode run.
///
/// # Errors
///
/// In one-shot mode any pipeline error is returned. Watch mode only fails
/// on output errors; failed ticks are reported and the loop continues.
pub async fn execute(config: &ResolvedConfig) -> Result<()> {
    let mut aggregator = build_aggregator(config)?;

    if let Some(interval) = config.watch {
        return watch::run_watch(&mut aggregator, config, interval).await;
    }

    let frame = run_pipeline(&mut aggregator, config.format, config.no_color).await?;
    print_frame(&frame, config.no_color);
    Ok(())
}

/// Build the client and aggregator for resolved settings.
///
/// # Errors
///
/// Returns error if the HTTP client cannot be built.
pub fn build_aggregator(config: &ResolvedConfig) -> Result<StatsAggregator> {
    let client = HubClient::with_timeout(&config.url, config.api_key.clone(), config.timeout)?;
    Ok(StatsAggregator::with_ttl(client, config.cache_ttl))
}

/// Log in if needed, get statistics, and render them.
///
/// # Errors
///
/// Propagates login, fetch, key-resolution and rendering errors unchanged.
pub async fn run_pipeline(
    aggregator: &mut StatsAggregator,
    format: OutputFormat,
    no_color: bool,
) -> Result<Frame> {
    if format != OutputFormat::Statusline {
        tracing::info!("Fetching statistics from Claude Code Hub");
    }

    if !aggregator.client().is_authenticated() {
        aggregator.login().await?;
    }

    let stats = aggregator.get_stats().await?;

    build_frame(stats, format, no_color)
}

/// Render `stats` and collect warnings. JSON frames carry no warnings.
///
/// # Errors
///
/// Returns rendering errors.
pub fn build_frame(stats: NormalizedStats, format: OutputFormat, no_color: bool) -> Result<Frame> {
    let warnings = if format == OutputFormat::Json {
        Vec::new()
    } else {
        compute_warnings(&stats)
    };
    let output = render::render(&stats, format, no_color)?;

    Ok(Frame {
        stats,
        warnings,
        output,
    })
}

/// Warnings to stderr, rendered output to stdout.
pub fn print_frame(frame: &Frame, no_color: bool) {
    if !frame.warnings.is_empty() {
        eprintln!();
        for warning in &frame.warnings {
            eprintln!("{}", warning.render(no_color));
        }
        eprintln!();
    }
    println!("{}", frame.output);
}
