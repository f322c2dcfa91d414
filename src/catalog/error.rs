//! Error types for catalog retrieval.
//!
//! Every variant is fatal to a run: without the catalog there is nothing to
//! download.

use thiserror::Error;

/// Errors that can occur while fetching the emoji catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The HTTP client could not be constructed.
    #[error("failed to build catalog HTTP client: {source}")]
    Client {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching emoji catalog from {url}: {source}")]
    Network {
        /// The endpoint that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching emoji catalog from {url}")]
    Timeout {
        /// The endpoint that timed out.
        url: String,
    },

    /// Non-2xx HTTP response.
    #[error("HTTP {status} fetching emoji catalog from {url}")]
    HttpStatus {
        /// The endpoint that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The API answered with `"ok": false`.
    #[error("emoji.list API error: {error}")]
    Api {
        /// The API's `error` code (for example `invalid_auth`).
        error: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("malformed emoji catalog response from {url}: {source}")]
    Decode {
        /// The endpoint whose body failed to decode.
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// Creates a network error, promoting reqwest timeouts to [`CatalogError::Timeout`].
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an API-level failure; a missing error code becomes `unknown_error`.
    pub fn api(error: Option<String>) -> Self {
        Self::Api {
            error: error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "unknown_error".to_string()),
        }
    }

    /// Creates a decode error.
    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }
}
