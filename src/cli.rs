//! CLI argument definitions using clap derive macros.

use clap::Parser;

use crawler_core::{DEFAULT_DOWNLOADERS, DEFAULT_EXTRACTORS, DEFAULT_PER_HOST};

/// Concurrent depth-bounded breadth-first web crawler.
///
/// Downloads the start page, extracts its links, and recurses layer by
/// layer up to the requested depth, printing every downloaded URL and every
/// per-URL error at the end.
#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(author, version, about)]
pub struct Args {
    /// URL to start crawling from
    pub url: String,

    /// Crawl depth; 1 downloads only the start page (1-50)
    #[arg(short = 'd', long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=50))]
    pub depth: u8,

    /// Download pool size (1-100)
    #[arg(long, default_value_t = DEFAULT_DOWNLOADERS as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub downloaders: u8,

    /// Extraction pool size (1-100)
    #[arg(long, default_value_t = DEFAULT_EXTRACTORS as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub extractors: u8,

    /// Maximum concurrent downloads per host (1-100)
    #[arg(long, default_value_t = DEFAULT_PER_HOST as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub per_host: u8,

    /// Restrict the crawl to this host; repeat to allow several
    #[arg(long = "host")]
    pub hosts: Vec<String>,

    /// HTTP request timeout in seconds (1-600)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..=600))]
    pub timeout_secs: u64,

    /// Emit the crawl result as JSON instead of a human-readable listing
    #[arg(long)]
    pub json: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
