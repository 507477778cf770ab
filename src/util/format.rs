//! Number formatting utilities.

/// Format a cost in USD with two decimals.
#[must_use]
pub fn format_cost(value: f64) -> String {
    format!("${value:.2}")
}

/// Format a cost in USD with four decimals.
#[must_use]
pub fn format_cost_precise(value: f64) -> String {
    format!("${value:.4}")
}

/// Format a number in its shortest form: `100.0` becomes `100`, `12.5`
/// stays `12.5`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Format a percentage rounded half away from zero.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{:.0}%", value.round())
}
