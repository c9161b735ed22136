//! # FAO Gender Scraper
//!
//! Crawls the paginated listings of the FAO Gender site (News, Insights,
//! Success Stories, E-learning and Publications), turns every listed item
//! into a structured record and exports the result to CSV and JSON.
//!
//! ## Features
//!
//! - Page-by-page crawl that stops on page budget, 404 or an empty page
//! - Two listing layouts (generic blocks and e-learning cards)
//! - Date normalization to ISO `YYYY-MM-DD` with year and month
//! - Keyword-scored classification into twenty thematic areas
//! - Optional deep-fetch of each article with extractive summarization
//! - Retry with exponential backoff for transient HTTP failures
//!
//! ## Usage
//!
//! ```sh
//! fao_gender_scraper --section news --max-pages 10
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Fetching**: Download listing pages one at a time
//! 2. **Extraction**: Parse item rows with the section's layout
//! 3. **Enrichment**: Normalize, classify and optionally summarize each row
//! 4. **Output**: Sort once and write CSV and JSON

use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod categories;
mod cli;
mod dates;
mod http;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod summarize;
mod utils;

use cli::Cli;
use http::{HttpFetcher, RetryFetch};
use utils::ensure_parent_dir;

/// Attempts per request, counting the first one.
const MAX_ATTEMPTS: usize = 5;
/// Delay before the first retry; doubles after each failure.
const BACKOFF_BASE: Duration = Duration::from_millis(600);

#[tokio::main]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Scrape failed");
            ExitCode::from(2)
        }
    }
}

#[instrument(level = "info", skip_all, fields(section = %args.section))]
async fn run(args: Cli) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();
    let csv_path = args.csv_path();
    let json_path = args.json_path();
    let opts = args.scrape_options();
    info!(
        start_page = opts.start_page,
        max_pages = opts.max_pages,
        fetch_article = opts.fetch_article,
        summarize = opts.summarize,
        "fao_gender_scraper starting up"
    );

    let fetcher = RetryFetch::new(HttpFetcher::new()?, MAX_ATTEMPTS, BACKOFF_BASE);
    let report = pipeline::scrape(&fetcher, &opts).await?;

    if report.records.is_empty() {
        warn!(
            stop = ?report.stop,
            "No items scraped. Try reducing delay, increasing max-pages, or running from a different network."
        );
        return Ok(());
    }

    // Early check: output directories exist and are writable
    ensure_parent_dir(&csv_path).await?;
    ensure_parent_dir(&json_path).await?;

    let count = report.records.len();
    outputs::write_outputs(report.records, &csv_path, &json_path).await?;

    let elapsed = start_time.elapsed();
    info!(
        rows = count,
        pages = report.pages_fetched,
        csv = %csv_path.display(),
        json = %json_path.display(),
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}
