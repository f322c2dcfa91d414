//! Constants for the download module (timeouts, pacing, temp files).

use std::time::Duration;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Sleep after each written file to stay under the CDN's rate limits.
pub const DEFAULT_PACING: Duration = Duration::from_millis(300);

/// Suffix for in-flight writes; renamed away once the body is complete.
pub const PARTIAL_SUFFIX: &str = ".part";
