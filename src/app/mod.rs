//! Run orchestration: fetch, resolve, report, download.
//!
//! [`run`] is the single entry point used by the binary. Fatal problems
//! (missing credential, unusable output directory, catalog failure) come back
//! as [`RunError`]; per-emoji problems are printed and counted in the
//! [`RunSummary`] instead.

mod orchestrator;
mod report;

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::download::DownloadError;

pub use orchestrator::{PROGRESS_INTERVAL, run};

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration is unusable (for example, no credential).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog could not be fetched.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The image downloader could not be set up.
    #[error(transparent)]
    Downloader(#[from] DownloadError),
}

/// Counts from a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub(crate) total_entries: usize,
    pub(crate) resolved: usize,
    pub(crate) unique_urls: usize,
    pub(crate) unresolved: Vec<String>,
    pub(crate) written: usize,
    pub(crate) skipped: usize,
    pub(crate) failed: Vec<String>,
}

impl RunSummary {
    /// Entries in the fetched catalog.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.total_entries
    }

    /// Entries whose alias chain resolved to a URL.
    #[must_use]
    pub fn resolved(&self) -> usize {
        self.resolved
    }

    /// Distinct image URLs among resolved entries.
    #[must_use]
    pub fn unique_urls(&self) -> usize {
        self.unique_urls
    }

    /// Names that failed alias resolution.
    #[must_use]
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    /// Files written this run.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Files skipped because they already existed.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Names whose download failed.
    #[must_use]
    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    /// Downloads attempted (written + skipped + failed).
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.written + self.skipped + self.failed.len()
    }
}
