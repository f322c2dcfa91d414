//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use emoji_downloader_core::DEFAULT_OUTPUT_DIR;

/// Download a Slack workspace's custom emoji.
///
/// Reads the bot token from SLACK_BOT_TOKEN, fetches the emoji catalog,
/// resolves aliases and saves every image. Files already present in the
/// output directory are skipped.
#[derive(Parser, Debug)]
#[command(name = "emoji-downloader")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory the images are written to
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Catalog endpoint (overrides SLACK_EMOJI_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Download only the first N resolved emoji (by name)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// Pause after each written file in milliseconds (0 to disable, max 60000)
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub pacing_ms: u64,

    /// Delay between retries of a rate-limited request in milliseconds (max 60000)
    #[arg(long, default_value_t = 2000, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub retry_delay_ms: u64,

    /// Retries for rate-limited (HTTP 429) requests (0-10)
    #[arg(short = 'r', long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub max_retries: u8,
}
