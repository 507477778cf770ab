//! Error rendering for the driver.
//!
//! Human output is a `❌ <message>` line followed by a hint; JSON output is
//! a structured object for machine consumers.

use rich_rust::Style;

use super::{color_style, colored, paint};
use crate::cli::args::OutputFormat;
use crate::error::HubError;

// =============================================================================
// Public API
// =============================================================================

/// Render an error for stderr.
///
/// JSON format gets a structured object. Otherwise the message is styled
/// red unless colors are disabled or stderr is not a terminal.
#[must_use]
pub fn render_error(error: &HubError, format: OutputFormat, no_color: bool) -> String {
    if format == OutputFormat::Json {
        return render_error_json(error);
    }

    let plain = no_color || !crate::util::env::stderr_is_tty();
    render_human(error, plain)
}

/// Render error as structured JSON for machine consumption.
#[must_use]
pub fn render_error_json(error: &HubError) -> String {
    let error_json = ErrorJson::from_error(error);
    serde_json::to_string_pretty(&error_json).unwrap_or_else(|_| render_human(error, true))
}

// =============================================================================
// Human Rendering
// =============================================================================

fn render_human(error: &HubError, no_color: bool) -> String {
    let suggestions = error.fix_suggestions();
    let header_style = color_style("red").map(|s| s.bold());

    let mut lines = vec![format!(
        "{} {}",
        paint(&format!("❌ {error}"), header_style, no_color),
        colored(&format!("[{}]", error.error_code()), "bright_black", no_color)
    )];

    if let Some(suggestion) = suggestions.first() {
        if !suggestion.context.is_empty() {
            lines.push(format!("   {}", suggestion.context));
        }
        // First real command, skipping comment lines
        if let Some(cmd) = suggestion.commands.iter().find(|c| !c.starts_with('#')) {
            lines.push(format!(
                "   {} {}",
                paint("Fix:", Some(Style::new().bold()), no_color),
                colored(cmd, "cyan", no_color)
            ));
        }
    }

    lines.join("\n")
}

// =============================================================================
// JSON Rendering
// =============================================================================

/// JSON representation of an error for machine consumption.
#[derive(serde::Serialize)]
struct ErrorJson {
    error_code: String,
    category: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<u16>,
    suggestions: Vec<SuggestionJson>,
}

#[derive(serde::Serialize)]
struct SuggestionJson {
    commands: Vec<String>,
    context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    prevention: Option<String>,
}

impl ErrorJson {
    fn from_error(error: &HubError) -> Self {
        Self {
            error_code: error.error_code().to_string(),
            category: error.category().to_string(),
            message: error.to_string(),
            status_code: error.status_code(),
            suggestions: error
                .fix_suggestions()
                .into_iter()
                .map(|s| SuggestionJson {
                    commands: s.commands,
                    context: s.context,
                    prevention: s.prevention,
                })
                .collect(),
        }
    }
}
