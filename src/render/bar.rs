//! Fixed-width usage bars.

use super::colored;

/// Filled cell.
pub const FILLED: char = '█';
/// Empty cell.
pub const EMPTY: char = '░';
/// Width used by the detailed report.
pub const DETAILED_WIDTH: usize = 15;

/// Percent at which a bar turns yellow.
pub const WARN_PERCENT: f64 = 75.0;
/// Percent at which a bar turns red.
pub const CRITICAL_PERCENT: f64 = 90.0;

/// A bar split into filled and empty cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBar {
    pub filled: usize,
    pub empty: usize,
    /// Usage percent, capped at 100.
    pub percent: f64,
}

impl ProgressBar {
    /// Compute a bar for `current` out of a positive `limit`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn new(current: f64, limit: f64, width: usize) -> Self {
        let percent = (current / limit * 100.0).clamp(0.0, 100.0);
        let filled = ((percent / 100.0 * width as f64).round() as usize).min(width);
        Self {
            filled,
            empty: width - filled,
            percent,
        }
    }

    /// Bar color for the current percent.
    #[must_use]
    pub fn color(&self) -> &'static str {
        if self.percent >= CRITICAL_PERCENT {
            "red"
        } else if self.percent >= WARN_PERCENT {
            "yellow"
        } else {
            "green"
        }
    }

    /// Render the bar, coloring filled cells by threshold and empty cells dim.
    #[must_use]
    pub fn render(&self, no_color: bool) -> String {
        let filled: String = std::iter::repeat_n(FILLED, self.filled).collect();
        let empty: String = std::iter::repeat_n(EMPTY, self.empty).collect();
        format!(
            "{}{}",
            colored(&filled, self.color(), no_color),
            colored(&empty, "bright_black", no_color)
        )
    }
}
