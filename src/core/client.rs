//! Hub session client.
//!
//! The Hub treats the API key itself as the session token: a successful
//! login only proves the key is accepted, and later requests restate it in an
//! `auth-token` cookie. The client moves from not-authenticated to
//! authenticated once and never back.

use std::time::Duration;

use reqwest::Client;
use serde_json::json;

use super::http::{self, DEFAULT_TIMEOUT};
use super::models::{AccountRecord, LoginResponse, UsersResponse};
use crate::error::{HubError, Result};

/// Login endpoint, relative to the base URL.
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Account listing endpoint, relative to the base URL.
pub const USERS_PATH: &str = "/api/actions/users/getUsers";

/// Name of the session cookie.
const AUTH_COOKIE: &str = "auth-token";

/// Session client for one Hub base URL and API key.
#[derive(Debug, Clone)]
pub struct HubClient {
    http: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
    credential: Option<String>,
}

impl HubClient {
    /// Create a client with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn with_timeout(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            http: http::build_client(timeout)?,
            base_url: normalize_base_url(base_url),
            api_key: api_key.into(),
            timeout,
            credential: None,
        })
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The API key this client authenticates with.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Whether [`login`](Self::login) has succeeded on this instance.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// Authenticate the API key with the Hub.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::AuthFailed`] on a non-success status or an
    /// explicit `ok: false`, and network/parse errors otherwise.
    pub async fn login(&mut self) -> Result<()> {
        let url = format!("{}{LOGIN_PATH}", self.base_url);
        let body = json!({ "key": self.api_key });
        let response = http::post_json(&self.http, &url, &body, None, self.timeout).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HubError::AuthFailed {
                status_code: Some(status.as_u16()),
                reason: status_text(status),
            });
        }

        let login: LoginResponse = http::decode_json(response).await?;
        if !login.ok {
            return Err(HubError::AuthFailed {
                status_code: None,
                reason: login.error.unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        self.credential = Some(format!("{AUTH_COOKIE}={}", self.api_key));
        tracing::info!(base_url = %self.base_url, "Logged in to Hub");
        Ok(())
    }

    /// Fetch every account visible to this key.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotAuthenticated`] before a successful login,
    /// [`HubError::FetchFailed`] on a non-success status, `ok: false` or a
    /// missing `data` field, and network/parse errors otherwise.
    pub async fn fetch_accounts(&self) -> Result<Vec<AccountRecord>> {
        let cookie = self.credential.as_deref().ok_or(HubError::NotAuthenticated)?;

        let url = format!("{}{USERS_PATH}", self.base_url);
        let response =
            http::post_json(&self.http, &url, &json!({}), Some(cookie), self.timeout).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HubError::FetchFailed {
                status_code: Some(status.as_u16()),
                reason: status.as_u16().to_string(),
            });
        }

        let users: UsersResponse = http::decode_json(response).await?;
        match users {
            UsersResponse {
                ok: true,
                data: Some(accounts),
                ..
            } => {
                tracing::debug!(accounts = accounts.len(), "Fetched Hub accounts");
                Ok(accounts)
            }
            UsersResponse { error, .. } => Err(HubError::FetchFailed {
                status_code: None,
                reason: format!(
                    "API error: {}",
                    error.unwrap_or_else(|| "Unknown error".to_string())
                ),
            }),
        }
    }
}

/// Strip a single trailing slash from the base URL.
fn normalize_base_url(base_url: &str) -> String {
    base_url.strip_suffix('/').unwrap_or(base_url).to_string()
}

fn status_text(status: reqwest::StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}
