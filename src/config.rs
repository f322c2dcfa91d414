//! Runtime configuration for a download run.
//!
//! Values come from the environment (credential, optional endpoint override)
//! and the CLI. Defaults live here as named constants so the binary and the
//! tests agree on them.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::download::{DEFAULT_PACING, RateLimitPolicy};

/// Environment variable holding the bearer credential.
pub const TOKEN_ENV_VAR: &str = "SLACK_BOT_TOKEN";

/// Environment variable that overrides the catalog endpoint.
pub const API_URL_ENV_VAR: &str = "SLACK_EMOJI_API_URL";

/// Default catalog endpoint.
pub const DEFAULT_API_URL: &str = "https://slack.com/api/emoji.list";

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "emojis";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bearer credential is absent or blank.
    #[error("{var} is not set")]
    MissingToken {
        /// Name of the variable that should hold it.
        var: &'static str,
    },

    /// The catalog endpoint is not an absolute http(s) URL.
    #[error("invalid API URL: {url}")]
    InvalidApiUrl {
        /// The rejected value.
        url: String,
    },
}

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    token: Option<String>,
    api_url: String,
    output_dir: PathBuf,
    limit: Option<usize>,
    pacing: Duration,
    rate_limit: RateLimitPolicy,
}

impl Config {
    /// Creates a configuration with defaults and the given credential.
    ///
    /// The credential is not validated here; [`credential`](Self::credential)
    /// reports a missing one when the run starts. Blank values count as missing.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            api_url: DEFAULT_API_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            limit: None,
            pacing: DEFAULT_PACING,
            rate_limit: RateLimitPolicy::default(),
        }
    }

    /// Creates a configuration from `SLACK_BOT_TOKEN` and `SLACK_EMOJI_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if the endpoint override is not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_api_url(None)
    }

    /// Like [`from_env`](Self::from_env), but an explicit `api_url` wins over
    /// `SLACK_EMOJI_API_URL`, which is then not read at all.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if the endpoint that applies is not a valid URL.
    pub fn from_env_with_api_url(api_url: Option<String>) -> Result<Self, ConfigError> {
        let config = Self::new(token_from_env());
        match api_url.or_else(api_url_from_env) {
            Some(url) => config.with_api_url(url),
            None => Ok(config),
        }
    }

    /// Overrides the catalog endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] unless `url` parses as an http(s) URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let valid = Url::parse(&url)
            .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid {
            return Err(ConfigError::InvalidApiUrl { url });
        }
        self.api_url = url;
        Ok(self)
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Limits how many resolved entries are downloaded.
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the sleep after each written file.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Sets the HTTP 429 retry policy.
    #[must_use]
    pub fn with_rate_limit_policy(mut self, policy: RateLimitPolicy) -> Self {
        self.rate_limit = policy;
        self
    }

    /// Returns the credential.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingToken`] when none was provided.
    pub fn credential(&self) -> Result<&str, ConfigError> {
        self.token
            .as_deref()
            .ok_or(ConfigError::MissingToken { var: TOKEN_ENV_VAR })
    }

    /// Catalog endpoint.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Download limit, if any.
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Sleep after each written file.
    #[must_use]
    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    /// HTTP 429 retry policy.
    #[must_use]
    pub fn rate_limit_policy(&self) -> &RateLimitPolicy {
        &self.rate_limit
    }
}

/// Reads the credential from `SLACK_BOT_TOKEN`; blank values are treated as unset.
#[must_use]
pub fn token_from_env() -> Option<String> {
    non_blank_var(TOKEN_ENV_VAR)
}

/// Reads the endpoint override from `SLACK_EMOJI_API_URL`.
#[must_use]
pub fn api_url_from_env() -> Option<String> {
    non_blank_var(API_URL_ENV_VAR)
}

fn non_blank_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
