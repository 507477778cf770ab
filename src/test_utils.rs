//! Test utilities for cch-statusline.
//!
//! Hub data factories and output helpers shared by unit and integration
//! tests.

use crate::core::models::{AccountRecord, KeyRecord, ModelStat, NormalizedStats};

// =============================================================================
// Test Data Factories
// =============================================================================

/// Create test `NormalizedStats` with realistic values.
///
/// - Today: $3.21 over 42 requests, no daily quota
/// - 5-hour and monthly limits set, weekly unlimited
/// - Session limit of 2, nothing in use
/// - Two model entries, sonnet attributed
#[must_use]
pub fn make_test_stats() -> NormalizedStats {
    NormalizedStats {
        today_cost: 3.21,
        today_requests: 42,
        daily_quota: None,
        avg_response_time: 0.0,
        cost_5h: 0.0,
        limit_5h: Some(10.0),
        cost_weekly: 0.0,
        limit_weekly: None,
        cost_monthly: 0.0,
        limit_monthly: Some(200.0),
        concurrent_sessions: 0,
        limit_concurrent_sessions: 2,
        last_provider_name: Some("anthropic-main".to_string()),
        last_used_model: Some("claude-sonnet-4-5-20250929".to_string()),
        model_stats: vec![
            ModelStat::new("claude-haiku-4-5-20251001", 30, 0.42),
            ModelStat::new("claude-sonnet-4-5-20250929", 12, 2.79),
        ],
    }
}

/// Create a test `KeyRecord` for `full_key` with today's cost set.
///
/// Limits are unset and no model stats are recorded.
#[must_use]
pub fn make_test_key(full_key: &str, today_usage: f64) -> KeyRecord {
    KeyRecord {
        id: 1,
        name: "default".to_string(),
        full_key: Some(full_key.to_string()),
        today_usage,
        today_call_count: 10,
        last_provider_name: None,
        model_stats: Vec::new(),
        limit_5h_usd: None,
        limit_weekly_usd: None,
        limit_monthly_usd: None,
        limit_concurrent_sessions: 0,
    }
}

/// Create a test `AccountRecord` owning `keys`.
#[must_use]
pub fn make_test_account(id: i64, keys: Vec<KeyRecord>) -> AccountRecord {
    AccountRecord {
        id,
        name: format!("user-{id}"),
        role: "user".to_string(),
        rpm: Some(60),
        daily_quota: None,
        provider_group: None,
        keys,
    }
}

// =============================================================================
// Fixtures and Helpers
// =============================================================================

/// Remove CSI color sequences (`ESC [ ... <letter>`) from rendered text.
#[must_use]
pub fn strip_ansi_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
        } else if chars.next() == Some('[') {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        }
    }
    out
}

/// A `config.toml` pointing at `url` with every section filled in.
#[must_use]
pub fn make_test_config_toml(url: &str) -> String {
    format!(
        r#"[hub]
url = "{url}"
timeout_seconds = 30

[cache]
ttl_ms = 7000

[output]
format = "statusline"
color = true

[watch]
interval_seconds = 30
"#
    )
}

/// A successful `getUsers` response body with one account owning one key.
#[must_use]
pub fn make_test_users_json(full_key: &str) -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "data": [{
            "id": 1,
            "name": "alice",
            "role": "user",
            "rpm": 60,
            "dailyQuota": 100,
            "providerGroup": null,
            "keys": [{
                "id": 11,
                "name": "laptop",
                "fullKey": full_key,
                "todayUsage": 12.5,
                "todayCallCount": 42,
                "lastUsedAt": "2026-01-19T10:00:00Z",
                "lastProviderName": "anthropic-main",
                "modelStats": [
                    {"model": "claude-haiku-4-5-20251001", "callCount": 30, "totalCost": 0.42},
                    {"model": "claude-sonnet-4-5-20250929", "callCount": 12, "totalCost": 12.08}
                ],
                "limit5hUsd": 10,
                "limitWeeklyUsd": null,
                "limitMonthlyUsd": 200,
                "limitConcurrentSessions": 2
            }]
        }]
    })
}

// =============================================================================
// Tests
// =============================================================================
