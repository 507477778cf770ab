//! Hub payloads and mock-server helpers for integration tests.
#![allow(dead_code)]
//!
//! # Usage
//!
//! ```rust,ignore
//! use common::fixtures::*;
//!
//! let server = MockServer::start().await;
//! mount_login_ok(&server).await;
//! mount_users(&server, users_body("sk-test"), 1).await;
//! ```

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub use cch_statusline::core::client::{LOGIN_PATH, USERS_PATH};
pub use cch_statusline::test_utils::make_test_users_json as users_body;

/// API key used by most tests.
pub const TEST_KEY: &str = "sk-test-0123456789";

/// `{ok: true}` login body.
#[must_use]
pub fn login_ok_body() -> Value {
    json!({ "ok": true })
}

/// `{ok: false, error}` body.
#[must_use]
pub fn error_body(message: &str) -> Value {
    json!({ "ok": false, "error": message })
}

/// A users body with several accounts; `target` is owned by the second one.
#[must_use]
pub fn multi_account_body(target: &str) -> Value {
    json!({
        "ok": true,
        "data": [
            {
                "id": 1,
                "name": "bob",
                "role": "admin",
                "rpm": null,
                "dailyQuota": null,
                "providerGroup": "default",
                "keys": [{
                    "id": 10,
                    "name": "ci",
                    "fullKey": "sk-someone-else",
                    "todayUsage": 99.0,
                    "todayCallCount": 999,
                    "lastUsedAt": null,
                    "lastProviderName": "other",
                    "modelStats": [],
                    "limit5hUsd": 1,
                    "limitWeeklyUsd": null,
                    "limitMonthlyUsd": null,
                    "limitConcurrentSessions": 0
                }]
            },
            {
                "id": 2,
                "name": "carol",
                "role": "user",
                "rpm": 30,
                "dailyQuota": 0,
                "providerGroup": null,
                "keys": [
                    {
                        "id": 20,
                        "name": "masked",
                        "fullKey": null,
                        "todayUsage": 5.0,
                        "todayCallCount": 5,
                        "lastUsedAt": null,
                        "lastProviderName": null,
                        "modelStats": [],
                        "limit5hUsd": null,
                        "limitWeeklyUsd": null,
                        "limitMonthlyUsd": null,
                        "limitConcurrentSessions": 0
                    },
                    {
                        "id": 21,
                        "name": "desktop",
                        "fullKey": target,
                        "todayUsage": 0.75,
                        "todayCallCount": 3,
                        "lastUsedAt": "2026-01-19T09:30:00Z",
                        "lastProviderName": "anthropic-backup",
                        "modelStats": [
                            {"model": "claude-opus-4-1-20250805", "callCount": 1, "totalCost": 0.5},
                            {"model": "claude-haiku-4-5-20251001", "callCount": 2, "totalCost": 0.25}
                        ],
                        "limit5hUsd": null,
                        "limitWeeklyUsd": 50,
                        "limitMonthlyUsd": null,
                        "limitConcurrentSessions": 1
                    }
                ]
            }
        ]
    })
}

/// Mount a successful login for [`TEST_KEY`].
pub async fn mount_login_ok(server: &MockServer) {
    mount_login(server, TEST_KEY, ResponseTemplate::new(200).set_body_json(login_ok_body())).await;
}

/// Mount a login response for `key`.
pub async fn mount_login(server: &MockServer, key: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_json(json!({ "key": key })))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Mount a `getUsers` response that must be requested exactly `times` times
/// with the session cookie for [`TEST_KEY`].
pub async fn mount_users(server: &MockServer, body: Value, times: u64) {
    Mock::given(method("POST"))
        .and(path(USERS_PATH))
        .and(header("cookie", format!("auth-token={TEST_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}
