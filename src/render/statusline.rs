//! Compact status line for editor integrations.
//!
//! Plain text only: the host terminal decides on colors.

use crate::core::models::{LimitWindow, NormalizedStats};
use crate::util::format::{format_cost, format_number};

const SEPARATOR: &str = " | ";

/// Render a one- or two-line status.
///
/// The second line lists cost windows and appears only when at least one
/// of them has a positive limit.
#[must_use]
pub fn render_statusline(stats: &NormalizedStats) -> String {
    let mut parts = Vec::with_capacity(4);

    match stats.positive_daily_quota() {
        Some(quota) => parts.push(format!(
            "💰 {}/{}",
            format_cost(stats.today_cost),
            format_number(quota)
        )),
        None => parts.push(format!("💰 {}", format_cost(stats.today_cost))),
    }

    parts.push(format!("📊 {} req", stats.today_requests));

    let model = stats
        .last_used_model
        .as_deref()
        .or_else(|| stats.model_stats.first().map(|m| m.model.as_str()));
    if let Some(model) = model {
        parts.push(format!("🤖 {}", shorten_model(model)));
    }

    if let Some(provider) = &stats.last_provider_name {
        parts.push(format!("⚡ {provider}"));
    }

    let mut lines = vec![parts.join(SEPARATOR)];

    let limits: Vec<String> = LimitWindow::COST
        .iter()
        .filter_map(|window| {
            let (current, limit) = stats.window(*window);
            limit.map(|limit| limit_part(*window, current, limit))
        })
        .collect();
    if !limits.is_empty() {
        lines.push(limits.join(SEPARATOR));
    }

    lines.join("\n")
}

fn limit_part(window: LimitWindow, current: f64, limit: f64) -> String {
    let label = match window {
        LimitWindow::FiveHour => "⏱️ 5h",
        LimitWindow::Weekly => "📅 Weekly",
        LimitWindow::Monthly => "📆 Monthly",
        LimitWindow::Sessions => "🔥 Sessions",
    };
    let usage = if current > 0.0 {
        format_cost(current)
    } else {
        String::new()
    };
    format!("{label}: {usage}/${}", format_number(limit))
}

/// Shorten a model id: drop the vendor prefix, keep the next three
/// dash-separated tokens (`claude-sonnet-4-5-20250929` → `sonnet-4-5`).
#[must_use]
pub fn shorten_model(model: &str) -> String {
    model.split('-').skip(1).take(3).collect::<Vec<_>>().join("-")
}
