//! Multi-section report with usage bars.

use rich_rust::Style;

use super::bar::{DETAILED_WIDTH, ProgressBar};
use super::{color_style, colored, paint};
use crate::core::models::{LimitWindow, NormalizedStats};
use crate::util::format::{format_cost, format_cost_precise, format_number, format_percent};

const TITLE: &str = "📊 Claude Code Hub Statistics";
const RULE_WIDTH: usize = 60;
const INDENT: &str = "   ";

/// Render the detailed report.
#[must_use]
pub fn render_detailed(stats: &NormalizedStats, no_color: bool) -> String {
    let mut lines = Vec::new();

    let title_style = color_style("cyan").map(|s| s.bold());
    lines.push(paint(TITLE, title_style, no_color));
    lines.push(colored(&"━".repeat(RULE_WIDTH), "bright_black", no_color));
    lines.push(String::new());

    render_today(&mut lines, stats, no_color);

    if !stats.model_stats.is_empty() {
        lines.push(String::new());
        lines.push(heading("🤖 Models:", no_color));
        for model in &stats.model_stats {
            lines.push(format!(
                "{INDENT}{} {} {}",
                colored(&format!("{}:", model.model), "bright_black", no_color),
                colored(&format!("{} calls", model.call_count), "cyan", no_color),
                colored(&format_cost_precise(model.total_cost), "green", no_color),
            ));
        }
    }

    lines.push(String::new());
    lines.push(heading("💵 Limits:", no_color));
    for window in LimitWindow::COST {
        lines.push(format!(
            "{INDENT}{} {}",
            label(window_label(*window), no_color),
            cost_window(stats, *window, no_color)
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "{} {}",
        heading("🔥 Sessions:", no_color),
        sessions(stats, no_color)
    ));

    lines.join("\n")
}

fn render_today(lines: &mut Vec<String>, stats: &NormalizedStats, no_color: bool) {
    lines.push(heading("📅 Today:", no_color));
    lines.push(format!(
        "{INDENT}{} {}",
        label("Cost:    ", no_color),
        colored(&format_cost_precise(stats.today_cost), "green", no_color)
    ));

    if let Some(quota) = stats.positive_daily_quota() {
        let detail = format!("({} / ${})", format_cost(stats.today_cost), format_number(quota));
        lines.push(format!(
            "{INDENT}{} {}",
            label("Daily:   ", no_color),
            usage_with_bar(stats.today_cost, quota, &detail, no_color)
        ));
    }

    lines.push(format!(
        "{INDENT}{} {}",
        label("Requests:", no_color),
        colored(&stats.today_requests.to_string(), "cyan", no_color)
    ));

    if let Some(model) = &stats.last_used_model {
        lines.push(format!(
            "{INDENT}{} {}",
            label("Model:   ", no_color),
            colored(model, "magenta", no_color)
        ));
    }
    if let Some(provider) = &stats.last_provider_name {
        lines.push(format!(
            "{INDENT}{} {}",
            label("Provider:", no_color),
            colored(provider, "yellow", no_color)
        ));
    }
}

fn cost_window(stats: &NormalizedStats, window: LimitWindow, no_color: bool) -> String {
    let (current, limit) = stats.window(window);
    match limit {
        Some(limit) => {
            let detail = format!(
                "({} / {})",
                format_cost_precise(current),
                format_cost(limit)
            );
            usage_with_bar(current, limit, &detail, no_color)
        }
        None => no_limit(&format_cost_precise(current), "green", no_color),
    }
}

fn sessions(stats: &NormalizedStats, no_color: bool) -> String {
    let (current, limit) = stats.window(LimitWindow::Sessions);
    match limit {
        Some(_) => {
            let detail = format!(
                "({} / {})",
                stats.concurrent_sessions, stats.limit_concurrent_sessions
            );
            usage_with_bar(current, f64::from(stats.limit_concurrent_sessions), &detail, no_color)
        }
        None => no_limit(&stats.concurrent_sessions.to_string(), "cyan", no_color),
    }
}

/// `<bar> P% (<detail>)` for a positive limit.
fn usage_with_bar(current: f64, limit: f64, detail: &str, no_color: bool) -> String {
    let bar = ProgressBar::new(current, limit, DETAILED_WIDTH);
    format!(
        "{} {} {}",
        bar.render(no_color),
        format_percent(current / limit * 100.0),
        colored(detail, "bright_black", no_color)
    )
}

fn no_limit(value: &str, color: &str, no_color: bool) -> String {
    format!(
        "{} {}",
        colored(value, color, no_color),
        colored("(no limit)", "bright_black", no_color)
    )
}

const fn window_label(window: LimitWindow) -> &'static str {
    match window {
        LimitWindow::FiveHour => "5-Hour: ",
        LimitWindow::Weekly => "Weekly: ",
        LimitWindow::Monthly => "Monthly:",
        LimitWindow::Sessions => "Sessions:",
    }
}

fn heading(text: &str, no_color: bool) -> String {
    paint(text, Some(Style::new().bold()), no_color)
}

fn label(text: &str, no_color: bool) -> String {
    colored(text, "bright_black", no_color)
}
