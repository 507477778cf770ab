//! Integration tests for the stats aggregator: caching, key resolution and
//! derived fields, against a mock Hub.

mod common;

use std::time::Duration;

use wiremock::MockServer;

use cch_statusline::core::client::HubClient;
use cch_statusline::core::stats::StatsAggregator;
use cch_statusline::error::HubError;

use common::fixtures::{TEST_KEY, mount_login_ok, mount_users, multi_account_body, users_body};
use common::logger::TestLogger;

async fn logged_in(server: &MockServer, ttl: Duration) -> StatsAggregator {
    mount_login_ok(server).await;
    let client = HubClient::new(&server.uri(), TEST_KEY).expect("client build");
    let mut aggregator = StatsAggregator::with_ttl(client, ttl);
    aggregator.login().await.expect("login should succeed");
    aggregator
}

// =============================================================================
// Cache
// =============================================================================

#[tokio::test]
async fn second_call_within_ttl_does_not_fetch() {
    let log = TestLogger::new("second_call_within_ttl_does_not_fetch");
    log.phase("setup");
    let server = MockServer::start().await;
    mount_users(&server, users_body(TEST_KEY), 1).await;
    let aggregator = logged_in(&server, Duration::from_secs(60)).await;

    log.phase("execute");
    let first = aggregator.get_stats().await.unwrap();
    let second = aggregator.get_stats().await.unwrap();

    log.phase("verify");
    assert_eq!(first, second);
    server.verify().await;
    log.finish_ok();
}

#[tokio::test]
async fn expired_entry_fetches_exactly_once_more() {
    let log = TestLogger::new("expired_entry_fetches_exactly_once_more");
    let server = MockServer::start().await;
    mount_users(&server, users_body(TEST_KEY), 2).await;
    let aggregator = logged_in(&server, Duration::from_millis(100)).await;

    aggregator.get_stats().await.unwrap();
    tokio::time::sleep(Duration::from_millis(250)).await;
    aggregator.get_stats().await.unwrap();
    aggregator.get_stats().await.unwrap();

    server.verify().await;
    log.finish_ok();
}

#[tokio::test]
async fn clear_cache_forces_refetch() {
    let log = TestLogger::new("clear_cache_forces_refetch");
    let server = MockServer::start().await;
    mount_users(&server, users_body(TEST_KEY), 2).await;
    let aggregator = logged_in(&server, Duration::from_secs(60)).await;

    aggregator.get_stats().await.unwrap();
    aggregator.clear_cache();
    aggregator.get_stats().await.unwrap();

    server.verify().await;
    log.finish_ok();
}

#[tokio::test]
async fn failures_are_not_cached() {
    let log = TestLogger::new("failures_are_not_cached");
    let server = MockServer::start().await;
    mount_users(&server, users_body("sk-other"), 2).await;
    let aggregator = logged_in(&server, Duration::from_secs(60)).await;

    assert!(matches!(aggregator.get_stats().await, Err(HubError::KeyNotFound)));
    assert!(matches!(aggregator.get_stats().await, Err(HubError::KeyNotFound)));

    server.verify().await;
    log.finish_ok();
}

// =============================================================================
// Derivation
// =============================================================================

#[tokio::test]
async fn derives_stats_for_single_account() {
    let log = TestLogger::new("derives_stats_for_single_account");
    let server = MockServer::start().await;
    mount_users(&server, users_body(TEST_KEY), 1).await;
    let aggregator = logged_in(&server, Duration::from_secs(60)).await;

    let stats = aggregator.get_stats().await.unwrap();

    assert!((stats.today_cost - 12.5).abs() < f64::EPSILON);
    assert_eq!(stats.today_requests, 42);
    assert_eq!(stats.daily_quota, Some(100.0));
    assert_eq!(stats.limit_5h, Some(10.0));
    assert_eq!(stats.limit_weekly, None);
    assert_eq!(stats.limit_monthly, Some(200.0));
    assert_eq!(stats.limit_concurrent_sessions, 2);
    assert_eq!(stats.last_provider_name.as_deref(), Some("anthropic-main"));
    assert_eq!(
        stats.last_used_model.as_deref(),
        Some("claude-sonnet-4-5-20250929")
    );
    assert!(stats.cost_5h.abs() < f64::EPSILON);
    log.finish_ok();
}

#[tokio::test]
async fn resolves_key_in_later_account() {
    let log = TestLogger::new("resolves_key_in_later_account");
    let server = MockServer::start().await;
    mount_users(&server, multi_account_body(TEST_KEY), 1).await;
    let aggregator = logged_in(&server, Duration::from_secs(60)).await;

    let stats = aggregator.get_stats().await.unwrap();

    assert!((stats.today_cost - 0.75).abs() < f64::EPSILON);
    assert_eq!(stats.today_requests, 3);
    assert_eq!(stats.daily_quota, Some(0.0));
    assert_eq!(stats.limit_weekly, Some(50.0));
    assert_eq!(stats.last_provider_name.as_deref(), Some("anthropic-backup"));
    assert_eq!(stats.last_used_model.as_deref(), Some("claude-opus-4-1-20250805"));
    log.finish_ok();
}

#[tokio::test]
async fn unknown_key_is_key_not_found() {
    let log = TestLogger::new("unknown_key_is_key_not_found");
    let server = MockServer::start().await;
    mount_users(&server, multi_account_body("sk-not-mine"), 1).await;
    let aggregator = logged_in(&server, Duration::from_secs(60)).await;

    let err = aggregator.get_stats().await.unwrap_err();
    assert!(matches!(err, HubError::KeyNotFound));
    assert_eq!(err.to_string(), "Key not found in user data");
    log.finish_ok();
}

#[tokio::test]
async fn get_stats_before_login_is_state_error() {
    let log = TestLogger::new("get_stats_before_login_is_state_error");
    let client = HubClient::new("http://127.0.0.1:9", TEST_KEY).unwrap();
    let aggregator = StatsAggregator::new(client);

    assert!(matches!(
        aggregator.get_stats().await,
        Err(HubError::NotAuthenticated)
    ));
    log.finish_ok();
}
