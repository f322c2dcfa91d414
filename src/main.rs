//! CLI entry point for the emoji downloader.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use emoji_downloader_core::{Config, RateLimitPolicy, run};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let config = build_config(&args)?;
    info!(api_url = config.api_url(), "emoji downloader starting");

    let summary = run(&config).await.context("emoji export failed")?;

    info!(
        written = summary.written(),
        skipped = summary.skipped(),
        failed = summary.failed().len(),
        "run finished"
    );

    Ok(())
}

fn build_config(args: &Args) -> Result<Config> {
    let config =
        Config::from_env_with_api_url(args.api_url.clone()).context("invalid configuration")?;

    let limit = args
        .limit
        .map(usize::try_from)
        .transpose()
        .context("--limit is too large for this platform")?;

    Ok(config
        .with_output_dir(args.output_dir.clone())
        .with_limit(limit)
        .with_pacing(Duration::from_millis(args.pacing_ms))
        .with_rate_limit_policy(RateLimitPolicy::new(
            u32::from(args.max_retries),
            Duration::from_millis(args.retry_delay_ms),
        )))
}
