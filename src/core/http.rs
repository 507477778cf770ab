//! HTTP client utilities.
//!
//! Provides the shared HTTP client used to talk to the Hub.

use std::time::Duration;

use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{HubError, Result};

/// Default timeout for HTTP requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a configured HTTP client.
///
/// # Errors
///
/// Returns error if client construction fails.
pub fn build_client(timeout: Duration) -> Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .user_agent(format!("cch-statusline/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| HubError::Network(e.to_string()))
}

/// POST a JSON body, optionally attaching a `Cookie` header.
///
/// Only transport failures are errors here; the caller decides what a
/// non-success status means.
///
/// # Errors
///
/// Returns [`HubError::Timeout`] or [`HubError::Network`] when the request
/// cannot be completed.
pub async fn post_json<B: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    body: &B,
    cookie: Option<&str>,
    timeout: Duration,
) -> Result<Response> {
    let mut request = client.post(url).json(body);
    if let Some(cookie) = cookie {
        request = request.header(reqwest::header::COOKIE, cookie);
    }

    tracing::debug!(url, "POST");

    request.send().await.map_err(|e| {
        if e.is_timeout() {
            HubError::Timeout(timeout.as_secs())
        } else {
            HubError::Network(e.to_string())
        }
    })
}

/// Decode a response body into a typed schema.
///
/// # Errors
///
/// Returns [`HubError::ParseResponse`] if the body is not valid JSON for `T`.
pub async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| HubError::Network(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| HubError::ParseResponse(e.to_string()))
}
