//! Emoji image downloader.
//!
//! This module provides the `EmojiDownloader` struct which fetches one image at
//! a time, retries rate-limited requests, and streams the body to disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, DEFAULT_PACING, PARTIAL_SUFFIX, READ_TIMEOUT_SECS};
use super::error::DownloadError;
use super::filename::{choose_extension, target_path};
use super::retry::{RateLimitPolicy, RetryDecision};
use crate::http_client::build_client;

/// Result of a successful [`EmojiDownloader::download`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The image was written to `path`.
    Written {
        /// Final output path.
        path: PathBuf,
        /// Bytes written.
        bytes: u64,
    },
    /// A file already existed at `path`; nothing was written.
    Skipped {
        /// The existing file.
        path: PathBuf,
    },
}

impl DownloadOutcome {
    /// The output path, whether written or skipped.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Written { path, .. } | Self::Skipped { path } => path,
        }
    }

    /// Returns `true` if the file was already present.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Downloads emoji images into one output directory.
///
/// Requests are made one at a time. Create the downloader once per run to
/// reuse its connection pool.
///
/// # Example
///
/// ```no_run
/// use emoji_downloader_core::download::EmojiDownloader;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let downloader = EmojiDownloader::new("./emojis")?;
/// let outcome = downloader
///     .download("party", "https://emoji.slack-edge.com/T1/party/abc.gif")
///     .await?;
/// println!("{}", outcome.path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EmojiDownloader {
    client: Client,
    output_dir: PathBuf,
    policy: RateLimitPolicy,
    pacing: Duration,
}

impl EmojiDownloader {
    /// Creates a downloader with default timeouts, retry policy and pacing.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] if the HTTP client cannot be built.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, DownloadError> {
        let client = build_client(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
            .map_err(|source| DownloadError::Client { source })?;
        Ok(Self {
            client,
            output_dir: output_dir.into(),
            policy: RateLimitPolicy::default(),
            pacing: DEFAULT_PACING,
        })
    }

    /// Replaces the 429 retry policy.
    #[must_use]
    pub fn with_rate_limit_policy(mut self, policy: RateLimitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the sleep performed after each written file.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Downloads one emoji image.
    ///
    /// The file is named `<sanitized-name><extension>`, with the extension taken
    /// from the Content-Type, then the URL, then `.img`. If that file already
    /// exists the body is not read and [`DownloadOutcome::Skipped`] is returned.
    /// After a write the downloader sleeps for its pacing interval.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The server returns 429 more times than the policy allows
    /// - The server returns any other error status
    /// - Writing to disk fails
    #[instrument(skip(self), fields(url = %url))]
    pub async fn download(&self, name: &str, url: &str) -> Result<DownloadOutcome, DownloadError> {
        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let response = self.fetch_with_retry(url).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let extension = choose_extension(content_type.as_deref(), url);
        let path = target_path(&self.output_dir, name, &extension);
        debug!(content_type = ?content_type, path = %path.display(), "resolved output path");

        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| DownloadError::io(path.clone(), e))?;
        if exists {
            debug!(path = %path.display(), "file already present, skipping");
            return Ok(DownloadOutcome::Skipped { path });
        }

        let bytes = write_atomically(response, url, &path).await?;
        info!(path = %path.display(), bytes, "emoji saved");

        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }

        Ok(DownloadOutcome::Written { path, bytes })
    }

    /// Sends the request, waiting out 429 responses per the retry policy.
    async fn fetch_with_retry(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        let mut retries_done = 0;
        loop {
            let error = match self.send_request(url).await {
                Ok(response) => return Ok(response),
                Err(error) => error,
            };

            match self.policy.should_retry(&error, retries_done) {
                RetryDecision::Retry { delay, retry } => {
                    warn!(
                        retry,
                        max = self.policy.max_retries(),
                        delay_ms = delay.as_millis(),
                        "rate limited, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    retries_done = retry;
                }
                RetryDecision::DoNotRetry { reason } => {
                    debug!(%reason, "giving up on request");
                    if error.is_rate_limited() {
                        return Err(DownloadError::rate_limit_exhausted(url, retries_done));
                    }
                    return Err(error);
                }
            }
        }
    }

    async fn send_request(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }
        Ok(response)
    }
}

/// Streams the body into `<path>.part`, then renames it to `path`.
///
/// The partial file is removed on failure so a later run never mistakes a
/// truncated image for a finished one.
async fn write_atomically(
    response: reqwest::Response,
    url: &str,
    path: &Path,
) -> Result<u64, DownloadError> {
    let partial_path = partial_path_for(path);
    let mut file = File::create(&partial_path)
        .await
        .map_err(|e| DownloadError::io(partial_path.clone(), e))?;

    let result = stream_to_file(&mut file, response, url, &partial_path).await;
    drop(file);

    let bytes = match result {
        Ok(bytes) => bytes,
        Err(error) => {
            debug!(path = %partial_path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&partial_path).await;
            return Err(error);
        }
    };

    if let Err(e) = tokio::fs::rename(&partial_path, path).await {
        let _ = tokio::fs::remove_file(&partial_path).await;
        return Err(DownloadError::io(path.to_path_buf(), e));
    }
    Ok(bytes)
}

fn partial_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(PARTIAL_SUFFIX);
    path.with_file_name(name)
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_path_appends_suffix() {
        let path = Path::new("/out/party.gif");
        assert_eq!(partial_path_for(path), Path::new("/out/party.gif.part"));
    }

    #[test]
    fn test_outcome_accessors() {
        let written = DownloadOutcome::Written {
            path: PathBuf::from("/out/a.png"),
            bytes: 3,
        };
        assert_eq!(written.path(), Path::new("/out/a.png"));
        assert!(!written.is_skipped());

        let skipped = DownloadOutcome::Skipped {
            path: PathBuf::from("/out/b.png"),
        };
        assert!(skipped.is_skipped());
    }
}
