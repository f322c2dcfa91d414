//! Emoji Downloader Core Library
//!
//! This library fetches a Slack workspace's custom emoji catalog, follows
//! `alias:` entries to the image they point at, and saves every image to a
//! local directory. Files already on disk are left alone, so a run can be
//! repeated safely.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`catalog`] - `emoji.list` API client and typed catalog values
//! - [`alias`] - Alias chain resolution with cycle detection
//! - [`download`] - Image download with rate-limit retry and extension inference
//! - [`config`] - Runtime configuration (credential, endpoint, pacing)
//! - [`app`] - Run orchestration and console reporting

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod alias;
pub mod app;
pub mod catalog;
pub mod config;
pub mod download;
mod http_client;
mod user_agent;

// Re-export commonly used types
pub use alias::{AliasError, ResolvedCatalog, resolve_alias, resolve_all};
pub use app::{RunError, RunSummary, run};
pub use catalog::{ALIAS_PREFIX, Catalog, CatalogClient, CatalogError, EmojiValue};
pub use config::{
    Config, ConfigError, DEFAULT_API_URL, DEFAULT_OUTPUT_DIR, TOKEN_ENV_VAR, token_from_env,
};
pub use download::{
    DEFAULT_PACING, DEFAULT_RATE_LIMIT_DELAY, DEFAULT_RATE_LIMIT_RETRIES, DownloadError,
    DownloadOutcome, EmojiDownloader, PLACEHOLDER_EXTENSION, RateLimitPolicy, RetryDecision,
};
