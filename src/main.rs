//! CLI entry point for the crawler tool.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crawler_core::{CrawlResult, Crawler, HttpFetcher};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let fetcher = Arc::new(HttpFetcher::with_timeout(Duration::from_secs(
        args.timeout_secs,
    )));
    let crawler = Crawler::new(
        fetcher,
        usize::from(args.downloaders),
        usize::from(args.extractors),
        usize::from(args.per_host),
    )?;

    info!(url = %args.url, depth = args.depth, hosts = args.hosts.len(), "starting crawl");

    let result = if args.hosts.is_empty() {
        crawler.crawl(&args.url, usize::from(args.depth)).await
    } else {
        crawler
            .crawl_with_hosts(&args.url, usize::from(args.depth), &args.hosts)
            .await
    };

    crawler.close();

    info!(
        downloaded = result.downloaded.len(),
        errors = result.errors.len(),
        "crawl complete"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    Ok(if result.has_errors() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

/// Prints the crawl result as a human-readable listing, sorted for stable
/// output.
fn print_result(result: &CrawlResult) {
    let mut downloaded: Vec<&String> = result.downloaded.iter().collect();
    downloaded.sort();

    println!("Downloaded {} page(s):", downloaded.len());
    for url in downloaded {
        println!("  {url}");
    }

    if result.has_errors() {
        let mut errors: Vec<(&String, String)> = result
            .errors
            .iter()
            .map(|(url, error)| (url, error.to_string()))
            .collect();
        errors.sort();

        println!("\nErrors ({}):", errors.len());
        for (url, error) in errors {
            println!("  {url}: {error}");
        }
    }
}
