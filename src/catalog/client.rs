//! `emoji.list` API client.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::{Catalog, CatalogError};
use crate::config::DEFAULT_API_URL;
use crate::http_client::build_client;

/// Overall timeout for the catalog request (30 seconds).
pub const CATALOG_TIMEOUT_SECS: u64 = 30;

/// Body of an `emoji.list` response.
#[derive(Debug, Deserialize)]
struct EmojiListResponse {
    ok: bool,
    emoji: Option<Catalog>,
    error: Option<String>,
}

/// Fetches a workspace's custom emoji catalog.
///
/// The credential is sent as a bearer token. Create the client once per run;
/// the catalog is fetched with a single request (no pagination).
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    api_url: String,
    token: String,
}

impl CatalogClient {
    /// Creates a client for the public Slack endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Client`] if the HTTP client cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self, CatalogError> {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    /// Creates a client for a custom endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Client`] if the HTTP client cannot be built.
    pub fn with_api_url(
        token: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let client = build_client(CATALOG_TIMEOUT_SECS, CATALOG_TIMEOUT_SECS)
            .map_err(|source| CatalogError::Client { source })?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            token: token.into(),
        })
    }

    /// Returns the endpoint this client calls.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetches the full catalog.
    ///
    /// An `ok: true` response without an `emoji` object yields an empty catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Network`] / [`CatalogError::Timeout`] on transport failure
    /// - [`CatalogError::HttpStatus`] on a non-2xx response
    /// - [`CatalogError::Decode`] if the body is not the expected JSON
    /// - [`CatalogError::Api`] if the body reports `"ok": false`
    #[instrument(skip(self), fields(url = %self.api_url))]
    pub async fn fetch(&self) -> Result<Catalog, CatalogError> {
        debug!("requesting emoji catalog");

        let response = self
            .client
            .get(&self.api_url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| CatalogError::network(&self.api_url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::http_status(&self.api_url, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::network(&self.api_url, e))?;
        let parsed: EmojiListResponse = serde_json::from_slice(&body)
            .map_err(|e| CatalogError::decode(&self.api_url, e))?;

        if !parsed.ok {
            return Err(CatalogError::api(parsed.error));
        }

        let catalog = parsed.emoji.unwrap_or_default();
        info!(entries = catalog.len(), "emoji catalog fetched");
        Ok(catalog)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_response_deserializes_ok_with_entries() {
        let body = r#"{"ok":true,"emoji":{"a":"https://x/a.png","b":"alias:a"}}"#;
        let parsed: EmojiListResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.ok);
        let emoji = parsed.emoji.unwrap();
        assert_eq!(emoji.len(), 2);
        assert_eq!(emoji["b"], "alias:a");
    }

    #[test]
    fn test_response_deserializes_error_without_emoji() {
        let body = r#"{"ok":false,"error":"not_authed"}"#;
        let parsed: EmojiListResponse = serde_json::from_str(body).unwrap();
        assert!(!parsed.ok);
        assert!(parsed.emoji.is_none());
        assert_eq!(parsed.error.as_deref(), Some("not_authed"));
    }

    #[test]
    fn test_response_ignores_unknown_fields() {
        let body = r#"{"ok":true,"emoji":{},"cache_ts":"1700000000.0","categories":[]}"#;
        let parsed: EmojiListResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.ok);
    }

    #[test]
    fn test_client_keeps_custom_api_url() {
        let client = CatalogClient::with_api_url("xoxb-test", "http://127.0.0.1:9/api").unwrap();
        assert_eq!(client.api_url(), "http://127.0.0.1:9/api");
    }
}
