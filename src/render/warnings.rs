//! Threshold warnings for limit windows.

use std::fmt;

use serde::Serialize;

use super::bar::{CRITICAL_PERCENT, WARN_PERCENT};
use super::colored;
use crate::core::models::{LimitWindow, NormalizedStats};

/// How close a window is to its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// At or above 75%.
    Warning,
    /// At or above 90%.
    Critical,
}

/// A window at or above the warning threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    pub window: LimitWindow,
    pub severity: Severity,
    /// Uncapped usage percent.
    pub percent: f64,
}

impl Warning {
    /// Render the message, red for critical and yellow otherwise.
    #[must_use]
    pub fn render(&self, no_color: bool) -> String {
        let color = match self.severity {
            Severity::Critical => "red",
            Severity::Warning => "yellow",
        };
        colored(&self.to_string(), color, no_color)
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.window.warning_name();
        let percent = self.percent.round();
        match self.severity {
            Severity::Critical => write!(f, "⚠️  Critical: {name} limit at {percent:.0}%!"),
            Severity::Warning => write!(f, "⚠️  Warning: {name} limit at {percent:.0}%"),
        }
    }
}

/// Warnings for every window with a positive limit that is at least 75% used,
/// ordered 5-hour, weekly, monthly, sessions.
#[must_use]
pub fn compute_warnings(stats: &NormalizedStats) -> Vec<Warning> {
    LimitWindow::ALL
        .iter()
        .filter_map(|window| {
            let (current, limit) = stats.window(*window);
            let percent = current / limit? * 100.0;
            let severity = if percent >= CRITICAL_PERCENT {
                Severity::Critical
            } else if percent >= WARN_PERCENT {
                Severity::Warning
            } else {
                return None;
            };
            Some(Warning {
                window: *window,
                severity,
                percent,
            })
        })
        .collect()
}
