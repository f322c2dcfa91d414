//! Shared User-Agent string for catalog and image requests.

/// Default User-Agent for every request made by the tool.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("emoji-downloader/{version} (slack-emoji-export)")
}
