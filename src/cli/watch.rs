//! Watch mode: re-run the pipeline on a fixed interval until Ctrl+C.
//!
//! The pipeline runs inline in the ticker loop, so at most one run is in
//! flight. Ticks that elapse while a run is busy are skipped. Ctrl+C ends
//! the loop at once, dropping any request still in flight.

use chrono::{DateTime, Utc};
use tokio::time::{Duration, MissedTickBehavior, interval};

use crate::cli::run::{Frame, print_frame, run_pipeline};
use crate::core::stats::StatsAggregator;
use crate::error::{HubError, Result};
use crate::render::colored;
use crate::storage::config::ResolvedConfig;

const SEPARATOR_WIDTH: usize = 25;

/// State tracking across watch iterations.
#[derive(Debug, Default)]
pub struct WatchState {
    pub last_frame: Option<Frame>,
    pub last_fetch_at: Option<DateTime<Utc>>,
    pub fetch_count: u64,
    pub error_count: u64,
    pub last_error: Option<HubError>,
}

impl WatchState {
    /// Create a new watch state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update state with the latest pipeline result.
    pub fn update(&mut self, result: Result<Frame>) {
        self.fetch_count += 1;
        match result {
            Ok(frame) => {
                self.last_frame = Some(frame);
                self.last_fetch_at = Some(Utc::now());
                self.last_error = None;
            }
            Err(e) => {
                self.error_count += 1;
                self.last_error = Some(e);
                // Keep last_frame for callers that want stale data.
            }
        }
    }
}

/// Run the pipeline every `interval_duration` until Ctrl+C.
///
/// # Errors
///
/// Pipeline failures never end the loop. A failed tick is logged and
/// reported on stderr, and the next tick tries again.
pub async fn run_watch(
    aggregator: &mut StatsAggregator,
    config: &ResolvedConfig,
    interval_duration: Duration,
) -> Result<()> {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };
    run_watch_until(aggregator, config, interval_duration, ctrl_c).await
}

/// Run the pipeline every `interval_duration` until `shutdown` resolves.
///
/// # Errors
///
/// Same as [`run_watch`].
pub async fn run_watch_until(
    aggregator: &mut StatsAggregator,
    config: &ResolvedConfig,
    interval_duration: Duration,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let mut state = WatchState::new();
    let mut ticker = interval(interval_duration);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    eprintln!(
        "{}",
        colored(
            &format!(
                "👀 Watch mode enabled (refresh every {}s)",
                interval_duration.as_secs()
            ),
            "cyan",
            config.no_color
        )
    );
    eprintln!("{}", colored("Press Ctrl+C to exit\n", "bright_black", config.no_color));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if state.fetch_count > 0 {
                    render_separator(config.no_color);
                }
                // Shutdown abandons the in-flight request.
                tokio::select! {
                    result = run_pipeline(aggregator, config.format, config.no_color) => {
                        state.update(result);
                        render_watch_frame(&state, config.no_color);
                    }
                    () = &mut shutdown => break,
                }
            }
            () = &mut shutdown => break,
        }
    }

    tracing::debug!(
        fetches = state.fetch_count,
        errors = state.error_count,
        "Watch mode stopped"
    );
    Ok(())
}

fn render_watch_frame(state: &WatchState, no_color: bool) {
    if let Some(err) = &state.last_error {
        tracing::warn!(error = %err, "Watch refresh failed");
        eprintln!("{}", colored(&format!("❌ {err}"), "red", no_color));
        return;
    }

    if let Some(frame) = &state.last_frame {
        print_frame(frame, no_color);
    }
}

fn render_separator(no_color: bool) {
    eprintln!();
    eprintln!("{}", colored(&"━".repeat(SEPARATOR_WIDTH), "bright_black", no_color));
}
