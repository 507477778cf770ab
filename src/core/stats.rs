//! Statistics aggregation over the Hub client.
//!
//! Wraps a [`HubClient`] with a TTL cache and derives [`NormalizedStats`]
//! from the raw account payload.

use std::time::Duration;

use super::client::HubClient;
use super::models::{AccountRecord, KeyRecord, ModelStat, NormalizedStats};
use crate::error::{HubError, Result};
use crate::storage::cache::{DEFAULT_TTL, TtlCache};

/// Cached, derived statistics for the client's API key.
#[derive(Debug)]
pub struct StatsAggregator {
    client: HubClient,
    cache: TtlCache<NormalizedStats>,
}

impl StatsAggregator {
    /// Wrap a client with the default 7 s cache.
    #[must_use]
    pub fn new(client: HubClient) -> Self {
        Self::with_ttl(client, DEFAULT_TTL)
    }

    /// Wrap a client with a custom cache TTL.
    #[must_use]
    pub fn with_ttl(client: HubClient, ttl: Duration) -> Self {
        Self {
            client,
            cache: TtlCache::new(ttl),
        }
    }

    /// The wrapped session client.
    #[must_use]
    pub const fn client(&self) -> &HubClient {
        &self.client
    }

    /// Log in through the wrapped client.
    ///
    /// # Errors
    ///
    /// Propagates [`HubClient::login`] errors.
    pub async fn login(&mut self) -> Result<()> {
        self.client.login().await
    }

    /// Cache key for this client's API key.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("stats-{}", self.client.api_key())
    }

    /// Return statistics, from cache when fresh, otherwise from the Hub.
    ///
    /// Concurrent misses are not de-duplicated: each one fetches.
    ///
    /// # Errors
    ///
    /// Propagates fetch errors and returns [`HubError::KeyNotFound`] when
    /// the API key is absent from the returned accounts.
    pub async fn get_stats(&self) -> Result<NormalizedStats> {
        let key = self.cache_key();
        if let Some(stats) = self.cache.get(&key) {
            tracing::debug!("Stats cache hit");
            return Ok(stats);
        }

        tracing::debug!("Stats cache miss, fetching");
        let accounts = self.client.fetch_accounts().await?;
        let stats = derive_stats(&accounts, self.client.api_key())?;
        self.cache.insert(key, stats.clone());
        Ok(stats)
    }

    /// Drop all cached statistics.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

/// Find the account and key whose literal key string equals `api_key`.
///
/// # Errors
///
/// Returns [`HubError::KeyNotFound`] when no key matches exactly.
pub fn resolve_key<'a>(
    accounts: &'a [AccountRecord],
    api_key: &str,
) -> Result<(&'a AccountRecord, &'a KeyRecord)> {
    accounts
        .iter()
        .find_map(|account| {
            account
                .keys
                .iter()
                .find(|key| key.full_key.as_deref() == Some(api_key))
                .map(|key| (account, key))
        })
        .ok_or(HubError::KeyNotFound)
}

/// The model with the highest total cost; the first one wins a tie.
///
/// This is a cost heuristic standing in for "last used", not a recency
/// measure.
#[must_use]
pub fn attribute_model(model_stats: &[ModelStat]) -> Option<&ModelStat> {
    model_stats.iter().fold(None, |best, current| match best {
        Some(best) if current.total_cost > best.total_cost => Some(current),
        Some(best) => Some(best),
        None => Some(current),
    })
}

/// Derive formatter-facing statistics for `api_key`.
///
/// # Errors
///
/// Returns [`HubError::KeyNotFound`] when the key is absent.
pub fn derive_stats(accounts: &[AccountRecord], api_key: &str) -> Result<NormalizedStats> {
    let (account, key) = resolve_key(accounts, api_key)?;

    Ok(NormalizedStats {
        today_cost: key.today_usage,
        today_requests: key.today_call_count,
        daily_quota: account.daily_quota,
        // Not yet wired: the Hub exposes no response-time endpoint for keys.
        avg_response_time: 0.0,

        // Not yet wired: rolling-window usage needs a per-key limit endpoint.
        cost_5h: 0.0,
        limit_5h: key.limit_5h_usd,
        cost_weekly: 0.0,
        limit_weekly: key.limit_weekly_usd,
        cost_monthly: 0.0,
        limit_monthly: key.limit_monthly_usd,
        concurrent_sessions: 0,
        limit_concurrent_sessions: key.limit_concurrent_sessions,

        last_provider_name: key.last_provider_name.clone(),
        last_used_model: attribute_model(&key.model_stats).map(|m| m.model.clone()),
        model_stats: key.model_stats.clone(),
    })
}
