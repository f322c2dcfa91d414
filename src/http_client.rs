//! Shared reqwest client construction for catalog and image requests.
//!
//! Both clients use the same User-Agent and gzip policy and differ only in
//! their timeouts.

use std::time::Duration;

use reqwest::Client;

use crate::user_agent;

/// Builds a reqwest client with the given connect and overall request timeouts.
pub(crate) fn build_client(
    connect_timeout_secs: u64,
    read_timeout_secs: u64,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .timeout(Duration::from_secs(read_timeout_secs))
        .gzip(true)
        .user_agent(user_agent::default_user_agent())
        .build()
}
