//! Console lines printed during a run.
//!
//! Progress and summaries go to stdout; `[WARN]` and `[ERROR]` lines go to
//! stderr so they survive `> log.txt` redirection of the progress output.

use std::fmt::Display;

use super::PROGRESS_INTERVAL;

pub(crate) fn catalog_counts(total_entries: usize, unique_urls: usize) {
    println!("Total entries       : {total_entries}");
    println!("Resolved image URLs : {unique_urls}");
}

/// Whether the download at zero-based `index` of `total` gets a progress line:
/// the first, every [`PROGRESS_INTERVAL`]th after it, and the last.
pub(crate) fn should_report_progress(index: usize, total: usize) -> bool {
    index % PROGRESS_INTERVAL == 0 || index + 1 == total
}

pub(crate) fn progress(current: usize, total: usize) {
    println!("Downloading images: {current}/{total}");
}

pub(crate) fn warn_item(name: &str, error: &impl Display) {
    eprintln!("{}", warn_line(name, error));
}

pub(crate) fn error_item(name: &str, error: &impl Display) {
    eprintln!("{}", error_line(name, error));
}

pub(crate) fn done() {
    println!("Done.");
}

fn warn_line(name: &str, error: &impl Display) -> String {
    format!("[WARN] {name}: {error}")
}

fn error_line(name: &str, error: &impl Display) -> String {
    format!("[ERROR] {name}: {error}")
}
