//! Alias resolution for catalog entries.
//!
//! An alias entry (`alias:<name>`) points at another entry, which may itself be
//! an alias. [`resolve_alias`] walks the chain until it reaches a direct URL.
//! Each call tracks the names it has visited, so a chain that loops back on
//! itself fails with [`AliasError::Cycle`] instead of spinning forever.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use thiserror::Error;
use tracing::{debug, instrument};

use crate::catalog::{Catalog, EmojiValue};

/// Errors from resolving a single name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    /// The name (or an alias target along the chain) is not in the catalog.
    #[error("emoji '{name}' not found in emoji map")]
    NotFound {
        /// The missing name.
        name: String,
    },

    /// The chain revisits a name it has already passed through.
    #[error("alias loop detected: {}", chain.join(" -> "))]
    Cycle {
        /// The name that was visited twice.
        name: String,
        /// Names in the order they were followed, ending with the repeated one.
        chain: Vec<String>,
    },
}

impl AliasError {
    /// Creates a not-found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Returns the name the error refers to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::NotFound { name } | Self::Cycle { name, .. } => name,
        }
    }
}

/// Follows `name` through the catalog to its final image URL.
///
/// # Errors
///
/// - [`AliasError::NotFound`] if `name` or any alias target is absent
/// - [`AliasError::Cycle`] if the chain revisits a name
#[instrument(level = "trace", skip(catalog))]
pub fn resolve_alias(name: &str, catalog: &Catalog) -> Result<String, AliasError> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut chain: Vec<&str> = Vec::new();
    let mut current = name;

    loop {
        chain.push(current);
        if !visited.insert(current) {
            return Err(AliasError::Cycle {
                name: current.to_string(),
                chain: chain.iter().map(|s| (*s).to_string()).collect(),
            });
        }

        let raw = catalog
            .get(current)
            .ok_or_else(|| AliasError::not_found(current))?;

        match EmojiValue::parse(raw) {
            EmojiValue::Url(url) => return Ok(url.to_string()),
            EmojiValue::Alias(target) => current = target,
        }
    }
}

/// Outcome of resolving every entry in a catalog.
#[derive(Debug, Default)]
pub struct ResolvedCatalog {
    resolved: BTreeMap<String, String>,
    failures: Vec<(String, AliasError)>,
}

impl ResolvedCatalog {
    /// Successfully resolved entries: name to direct URL.
    #[must_use]
    pub fn resolved(&self) -> &BTreeMap<String, String> {
        &self.resolved
    }

    /// Names that failed to resolve, with the reason.
    #[must_use]
    pub fn failures(&self) -> &[(String, AliasError)] {
        &self.failures
    }

    /// Number of resolved entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Returns `true` if nothing resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// Number of distinct image URLs among resolved entries.
    ///
    /// Aliases share their target's URL, so this is usually smaller than [`len`](Self::len).
    #[must_use]
    pub fn unique_url_count(&self) -> usize {
        self.resolved
            .values()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Keeps only the first `limit` resolved entries (in name order).
    pub fn truncate(&mut self, limit: usize) {
        if self.resolved.len() > limit {
            self.resolved = std::mem::take(&mut self.resolved)
                .into_iter()
                .take(limit)
                .collect();
        }
    }
}

/// Resolves every name in the catalog.
///
/// Failures are collected rather than returned: one broken alias must not stop
/// the others from downloading.
#[instrument(level = "debug", skip_all, fields(entries = catalog.len()))]
pub fn resolve_all(catalog: &Catalog) -> ResolvedCatalog {
    let mut result = ResolvedCatalog::default();

    for name in catalog.keys() {
        match resolve_alias(name, catalog) {
            Ok(url) => {
                result.resolved.insert(name.clone(), url);
            }
            Err(error) => {
                debug!(
                    name = %name,
                    at = error.name(),
                    error = %error,
                    "alias resolution failed"
                );
                result.failures.push((name.clone(), error));
            }
        }
    }

    debug!(
        resolved = result.resolved.len(),
        failed = result.failures.len(),
        "catalog resolved"
    );
    result
}
