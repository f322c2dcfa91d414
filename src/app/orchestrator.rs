//! The end-to-end run sequence.

use tracing::{debug, info, instrument};

use super::{RunError, RunSummary, report};
use crate::alias::resolve_all;
use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::download::{DownloadOutcome, EmojiDownloader};

/// A progress line is printed for the first download, every this-many after it, and the last.
pub const PROGRESS_INTERVAL: usize = 100;

/// Runs one export: fetch the catalog, resolve aliases, download every image.
///
/// Steps, in order:
/// 1. require a credential
/// 2. create the output directory
/// 3. fetch the catalog
/// 4. resolve every name, printing `[WARN]` for failures
/// 5. print total entries and distinct URL counts
/// 6. download each resolved entry, printing progress and `[ERROR]` for failures
/// 7. print `Done.`
///
/// # Errors
///
/// Returns [`RunError`] for the fatal cases only: missing credential, output
/// directory creation, catalog retrieval, or downloader setup. Alias and
/// download failures are reported and counted in the summary.
#[instrument(skip_all, fields(output_dir = %config.output_dir().display()))]
pub async fn run(config: &Config) -> Result<RunSummary, RunError> {
    let token = config.credential()?;

    let output_dir = config.output_dir();
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| RunError::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

    let catalog = CatalogClient::with_api_url(token, config.api_url())?
        .fetch()
        .await?;

    let mut resolved = resolve_all(&catalog);
    for (name, error) in resolved.failures() {
        report::warn_item(name, error);
    }

    let mut summary = RunSummary {
        total_entries: catalog.len(),
        resolved: resolved.len(),
        unique_urls: resolved.unique_url_count(),
        unresolved: resolved
            .failures()
            .iter()
            .map(|(name, _)| name.clone())
            .collect(),
        ..RunSummary::default()
    };
    report::catalog_counts(summary.total_entries, summary.unique_urls);

    if let Some(limit) = config.limit() {
        debug!(limit, "limiting downloads");
        resolved.truncate(limit);
    }

    let downloader = EmojiDownloader::new(output_dir)?
        .with_rate_limit_policy(config.rate_limit_policy().clone())
        .with_pacing(config.pacing());

    let total = resolved.len();
    for (index, (name, url)) in resolved.resolved().iter().enumerate() {
        if report::should_report_progress(index, total) {
            report::progress(index + 1, total);
        }

        match downloader.download(name, url).await {
            Ok(DownloadOutcome::Written { .. }) => summary.written += 1,
            Ok(DownloadOutcome::Skipped { .. }) => summary.skipped += 1,
            Err(error) => {
                report::error_item(name, &error);
                summary.failed.push(name.clone());
            }
        }
    }

    report::done();
    info!(
        total = summary.total_entries,
        unique_urls = summary.unique_urls,
        unresolved = summary.unresolved.len(),
        written = summary.written,
        skipped = summary.skipped,
        failed = summary.failed.len(),
        "export complete"
    );

    Ok(summary)
}
