//! Slack custom emoji catalog retrieval.
//!
//! The `emoji.list` endpoint returns every custom emoji in the workspace as a
//! flat `name -> value` object. A value is either a direct image URL or an
//! alias reference of the form `alias:<other-name>`.
//!
//! # Example
//!
//! ```no_run
//! use emoji_downloader_core::catalog::CatalogClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CatalogClient::new("xoxb-token")?;
//! let catalog = client.fetch().await?;
//! println!("{} entries", catalog.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

use std::collections::BTreeMap;

pub use client::{CATALOG_TIMEOUT_SECS, CatalogClient};
pub use error::CatalogError;

/// Raw catalog as returned by the API: emoji name to raw value.
///
/// A `BTreeMap` keeps iteration (and therefore download order and console
/// output) deterministic across runs.
pub type Catalog = BTreeMap<String, String>;

/// Prefix marking an alias value.
pub const ALIAS_PREFIX: &str = "alias:";

/// A parsed catalog value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiValue<'a> {
    /// Direct image URL.
    Url(&'a str),
    /// Name of another catalog entry.
    Alias(&'a str),
}

impl<'a> EmojiValue<'a> {
    /// Classifies a raw catalog value.
    ///
    /// Only the first `alias:` prefix is stripped; the remainder is the target
    /// name verbatim.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        match raw.strip_prefix(ALIAS_PREFIX) {
            Some(target) => Self::Alias(target),
            None => Self::Url(raw),
        }
    }
}
