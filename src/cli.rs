//! Command-line interface definitions for the FAO Gender scraper.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The section can also come from the environment.

use crate::models::Section;
use crate::pipeline::ScrapeOptions;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for the scraper.
///
/// # Examples
///
/// ```sh
/// # First 10 pages of News into public/news.csv and public/news.json
/// fao_gender_scraper --section news --max-pages 10
///
/// # Insights until the listing runs out, 2s between pages
/// fao_gender_scraper --section insights --delay 2.0 --out public/insights.csv
///
/// # Publications starting from listing page 61
/// fao_gender_scraper --section publications --start-page 61 --max-pages 3
///
/// # Deep-scrape News and summarize each article in 3 sentences
/// fao_gender_scraper --section news --max-pages 5 --fetch-article --summarize --summary-sentences 3
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Which section to scrape
    #[arg(long, value_enum, env = "FAO_SECTION", default_value = "news")]
    pub section: Section,

    /// Start at this listing page number
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub start_page: u32,

    /// Maximum number of pages to fetch (stops early if a page has no items)
    #[arg(long, default_value_t = 10)]
    pub max_pages: u32,

    /// Seconds to sleep between listing page requests
    #[arg(long, default_value_t = 0.8)]
    pub delay: f64,

    /// Output CSV path [default: public/<section>.csv]
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Output JSON path [default: the CSV path with a .json extension]
    #[arg(long)]
    pub json_out: Option<PathBuf>,

    /// Fetch each article page and extract its main text
    #[arg(long)]
    pub fetch_article: bool,

    /// Generate an extractive summary per item
    #[arg(long)]
    pub summarize: bool,

    /// Number of sentences in the summary (clamped to 1..=8)
    #[arg(long, default_value_t = 3)]
    pub summary_sentences: i64,

    /// Maximum article pages fetched at once within a listing page
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=16))]
    pub article_concurrency: u16,
}

impl Cli {
    /// CSV output path, defaulting to `public/<section>.csv`.
    pub fn csv_path(&self) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| PathBuf::from("public").join(format!("{}.csv", self.section)))
    }

    /// JSON output path, defaulting to the CSV path with a `.json` extension.
    pub fn json_path(&self) -> PathBuf {
        self.json_out
            .clone()
            .unwrap_or_else(|| self.csv_path().with_extension("json"))
    }

    /// Controller options derived from the flags.
    pub fn scrape_options(&self) -> ScrapeOptions {
        let delay = if self.delay.is_finite() && self.delay > 0.0 {
            Duration::from_secs_f64(self.delay)
        } else {
            Duration::ZERO
        };
        ScrapeOptions {
            section: self.section,
            start_page: self.start_page,
            max_pages: self.max_pages,
            delay,
            fetch_article: self.fetch_article,
            summarize: self.summarize,
            summary_sentences: self.summary_sentences.clamp(1, 8) as usize,
            article_concurrency: usize::from(self.article_concurrency),
        }
    }
}
