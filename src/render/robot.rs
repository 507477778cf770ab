//! Machine-readable output.

use crate::error::Result;

/// Render any serializable value as pretty JSON (two-space indent).
pub fn render_json<T: serde::Serialize>(output: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}
