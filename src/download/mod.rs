//! Emoji image downloads.
//!
//! This module fetches resolved image URLs and writes them to the output
//! directory, one request at a time.
//!
//! # Features
//!
//! - Extension from Content-Type, then URL suffix, then `.img`
//! - Filesystem-safe names (`/ \ : * ? " < > |` become `_`)
//! - Existing files are skipped, so re-runs are idempotent
//! - HTTP 429 retried up to 5 times with a fixed 2-second delay
//! - Fixed pacing sleep after every written file
//!
//! # Example
//!
//! ```no_run
//! use emoji_downloader_core::download::EmojiDownloader;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = EmojiDownloader::new("./emojis")?;
//! downloader
//!     .download("team/logo", "https://emoji.slack-edge.com/T1/logo/1.png")
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;
mod filename;
mod retry;

pub use client::{DownloadOutcome, EmojiDownloader};
pub use constants::DEFAULT_PACING;
pub use error::DownloadError;
pub use filename::PLACEHOLDER_EXTENSION;
pub use retry::{
    DEFAULT_RATE_LIMIT_DELAY, DEFAULT_RATE_LIMIT_RETRIES, RateLimitPolicy, RetryDecision,
};

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
