//! Output rendering for the statusline, detailed and JSON formats.

pub mod bar;
pub mod detailed;
pub mod error;
pub mod robot;
pub mod statusline;
pub mod warnings;

use rich_rust::{Color, ColorSystem, Style};

use crate::cli::args::OutputFormat;
use crate::core::models::NormalizedStats;
use crate::error::Result;
pub use bar::ProgressBar;
pub use warnings::{Severity, Warning, compute_warnings};

/// Render statistics in the requested format.
///
/// # Errors
///
/// Returns [`crate::HubError::Json`] if JSON serialization fails.
pub fn render(stats: &NormalizedStats, format: OutputFormat, no_color: bool) -> Result<String> {
    match format {
        OutputFormat::Statusline => Ok(statusline::render_statusline(stats)),
        OutputFormat::Detailed => Ok(detailed::render_detailed(stats, no_color)),
        OutputFormat::Json => robot::render_json(stats),
    }
}

/// A foreground-colored style, or `None` if the name does not parse.
pub(crate) fn color_style(name: &str) -> Option<Style> {
    Color::parse(name).ok().map(|c| Style::new().color(c))
}

/// Apply `style` to `text` unless colors are disabled.
pub(crate) fn paint(text: &str, style: Option<Style>, no_color: bool) -> String {
    match style {
        Some(style) if !no_color => style.render(text, ColorSystem::TrueColor),
        _ => text.to_string(),
    }
}

/// Shorthand for [`paint`] with a named color.
pub(crate) fn colored(text: &str, color: &str, no_color: bool) -> String {
    paint(text, color_style(color), no_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_test_stats, strip_ansi_codes};

    #[test]
    fn paint_is_plain_without_color() {
        assert_eq!(colored("hello", "green", true), "hello");
        assert_eq!(paint("hello", None, false), "hello");
    }

    #[test]
    fn paint_keeps_text_with_color() {
        let out = colored("hello", "green", false);
        assert_eq!(strip_ansi_codes(&out), "hello");
    }

    #[test]
    fn render_dispatches_by_format() {
        let stats = make_test_stats();

        let line = render(&stats, OutputFormat::Statusline, true).unwrap();
        assert!(line.starts_with("💰 "));

        let detailed = render(&stats, OutputFormat::Detailed, true).unwrap();
        assert!(detailed.starts_with("📊 Claude Code Hub Statistics"));

        let json = render(&stats, OutputFormat::Json, true).unwrap();
        assert!(json.starts_with('{'));
    }
}
