//! Data models for the Hub wire format and the derived statistics record.
//!
//! The `*Response` and `*Record` types mirror the Hub's JSON schema and are
//! validated by serde at the network boundary. [`NormalizedStats`] is the
//! formatter-facing record derived from them.

use serde::{Deserialize, Serialize};

// =============================================================================
// Wire format
// =============================================================================

/// Response of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub ok: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of `POST /api/actions/users/getUsers`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsersResponse {
    pub ok: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<AccountRecord>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One account (user) as reported by the Hub.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub role: String,

    #[serde(default)]
    pub rpm: Option<i64>,

    /// Daily spend ceiling in USD, if any.
    #[serde(default)]
    pub daily_quota: Option<f64>,

    #[serde(default)]
    pub provider_group: Option<String>,

    pub keys: Vec<KeyRecord>,
}

/// One API key belonging to an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyRecord {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub name: String,

    /// Literal key string. Only present when the Hub exposes full keys.
    #[serde(default)]
    pub full_key: Option<String>,

    /// Today's spend in USD.
    pub today_usage: f64,

    pub today_call_count: u64,

    #[serde(default)]
    pub last_provider_name: Option<String>,

    #[serde(default)]
    pub model_stats: Vec<ModelStat>,

    #[serde(default)]
    pub limit_5h_usd: Option<f64>,

    #[serde(default)]
    pub limit_weekly_usd: Option<f64>,

    #[serde(default)]
    pub limit_monthly_usd: Option<f64>,

    /// Maximum concurrent sessions; 0 means unlimited.
    #[serde(default)]
    pub limit_concurrent_sessions: u32,
}

/// Per-model usage for a key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelStat {
    pub model: String,
    pub call_count: u64,
    pub total_cost: f64,
}

impl ModelStat {
    /// Create a model stat entry.
    #[must_use]
    pub fn new(model: impl Into<String>, call_count: u64, total_cost: f64) -> Self {
        Self {
            model: model.into(),
            call_count,
            total_cost,
        }
    }
}

// =============================================================================
// Normalized statistics
// =============================================================================

/// Presentation-ready statistics for one API key.
///
/// Limits are `None` when unlimited. Current-usage fields for the 5-hour,
/// weekly and monthly windows, concurrent sessions and average response time
/// are not yet wired to a Hub endpoint and are always 0; a zero current value
/// never implies "no limit".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedStats {
    pub today_cost: f64,
    pub today_requests: u64,
    pub daily_quota: Option<f64>,
    pub avg_response_time: f64,

    pub cost_5h: f64,
    pub limit_5h: Option<f64>,
    pub cost_weekly: f64,
    pub limit_weekly: Option<f64>,
    pub cost_monthly: f64,
    pub limit_monthly: Option<f64>,
    pub concurrent_sessions: u32,
    /// 0 means unlimited.
    pub limit_concurrent_sessions: u32,

    pub last_provider_name: Option<String>,
    pub last_used_model: Option<String>,
    pub model_stats: Vec<ModelStat>,
}

impl NormalizedStats {
    /// Current usage and configured ceiling for a window.
    ///
    /// The limit is `Some` only when a positive ceiling is configured.
    #[must_use]
    pub fn window(&self, window: LimitWindow) -> (f64, Option<f64>) {
        let (current, limit) = match window {
            LimitWindow::FiveHour => (self.cost_5h, self.limit_5h),
            LimitWindow::Weekly => (self.cost_weekly, self.limit_weekly),
            LimitWindow::Monthly => (self.cost_monthly, self.limit_monthly),
            LimitWindow::Sessions => (
                f64::from(self.concurrent_sessions),
                Some(f64::from(self.limit_concurrent_sessions)),
            ),
        };
        (current, limit.filter(|l| *l > 0.0))
    }

    /// Daily quota, if a positive one is configured.
    #[must_use]
    pub fn positive_daily_quota(&self) -> Option<f64> {
        self.daily_quota.filter(|q| *q > 0.0)
    }

    /// Whether any cost window has a positive limit.
    #[must_use]
    pub fn has_cost_limits(&self) -> bool {
        LimitWindow::COST
            .iter()
            .any(|w| self.window(*w).1.is_some())
    }
}

/// Percentage-bearing accounting windows, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LimitWindow {
    FiveHour,
    Weekly,
    Monthly,
    Sessions,
}

impl LimitWindow {
    /// All windows in display and warning order.
    pub const ALL: &'static [Self] = &[Self::FiveHour, Self::Weekly, Self::Monthly, Self::Sessions];

    /// Cost windows only (no sessions).
    pub const COST: &'static [Self] = &[Self::FiveHour, Self::Weekly, Self::Monthly];

    /// Name used in warning messages.
    #[must_use]
    pub const fn warning_name(self) -> &'static str {
        match self {
            Self::FiveHour => "5-hour",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Sessions => "Session",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::make_test_stats;

    #[test]
    fn key_record_parses_hub_payload() {
        let json = r#"{
            "id": 7,
            "name": "laptop",
            "fullKey": "sk-abc",
            "todayUsage": 1.25,
            "todayCallCount": 12,
            "lastUsedAt": "2026-01-19 10:00:00",
            "lastProviderName": "anthropic-main",
            "modelStats": [{"model": "claude-sonnet-4-5", "callCount": 3, "totalCost": 0.5}],
            "limit5hUsd": 10,
            "limitWeeklyUsd": null,
            "limitMonthlyUsd": 200,
            "limitConcurrentSessions": 2
        }"#;

        let key: KeyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(key.full_key.as_deref(), Some("sk-abc"));
        assert_eq!(key.today_call_count, 12);
        assert_eq!(key.limit_5h_usd, Some(10.0));
        assert_eq!(key.limit_weekly_usd, None);
        assert_eq!(key.model_stats.len(), 1);
    }

    #[test]
    fn last_used_timestamp_in_any_shape_is_ignored() {
        for stamp in ["1768816800000", "\"yesterday\"", "null"] {
            let json = format!(
                r#"{{"fullKey": "sk-a", "todayUsage": 0.5, "todayCallCount": 1, "lastUsedAt": {stamp}}}"#
            );
            let key: KeyRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(key.full_key.as_deref(), Some("sk-a"));
        }
    }

    #[test]
    fn key_record_missing_required_field_is_rejected() {
        let json = r#"{"fullKey": "sk-abc", "todayCallCount": 1}"#;
        assert!(serde_json::from_str::<KeyRecord>(json).is_err());
    }

    #[test]
    fn users_response_error_shape() {
        let json = r#"{"ok": false, "error": "forbidden"}"#;
        let resp: UsersResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.ok);
        assert!(resp.data.is_none());
        assert_eq!(resp.error.as_deref(), Some("forbidden"));
    }

    #[test]
    fn stats_use_camel_case_fields() {
        let json = serde_json::to_value(make_test_stats()).unwrap();
        assert!(json.get("todayCost").is_some());
        assert!(json.get("limit5h").is_some());
        assert!(json.get("cost5h").is_some());
        assert!(json.get("limitConcurrentSessions").is_some());
        assert!(json.get("modelStats").is_some());
    }

    #[test]
    fn null_limits_serialize_as_null() {
        let mut stats = make_test_stats();
        stats.limit_weekly = None;
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json["limitWeekly"].is_null());
    }

    #[test]
    fn window_hides_non_positive_limits() {
        let mut stats = make_test_stats();
        stats.limit_5h = Some(0.0);
        stats.limit_concurrent_sessions = 0;
        assert_eq!(stats.window(LimitWindow::FiveHour).1, None);
        assert_eq!(stats.window(LimitWindow::Sessions).1, None);
    }

    #[test]
    fn has_cost_limits_ignores_sessions() {
        let mut stats = make_test_stats();
        stats.limit_5h = None;
        stats.limit_weekly = None;
        stats.limit_monthly = None;
        stats.limit_concurrent_sessions = 5;
        assert!(!stats.has_cost_limits());
    }
}
