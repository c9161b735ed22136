//! Pagination controller and per-record enrichment.
//!
//! [`scrape`] walks a section page by page until one of three things happens:
//! the page budget is used up, the origin answers 404, or a page yields no
//! rows. Every row on a page is turned into a [`Record`] (text cleanup, date
//! normalization, thematic area, optional deep-fetch and summary) before the
//! page's records are appended in listing order.
//!
//! Per-article failures never escape this module. Only a transport failure on
//! a listing page, after the fetcher's own retries, aborts the run.

use crate::categories::categorize;
use crate::dates::normalize_date;
use crate::http::{Fetch, FetchError};
use crate::models::{RawRow, Record, Section};
use crate::scrapers::{article::extract_main_text, listing_url};
use crate::summarize::summarize;
use crate::utils::{normalize_space, truncate_for_log};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Timeout for a listing page request.
pub const LISTING_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for an article page request.
pub const ARTICLE_TIMEOUT: Duration = Duration::from_secs(45);

/// Everything the controller needs to know about a run.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub section: Section,
    pub start_page: u32,
    pub max_pages: u32,
    /// Pause after each processed page; zero disables it.
    pub delay: Duration,
    pub fetch_article: bool,
    pub summarize: bool,
    pub summary_sentences: usize,
    /// Upper bound on in-flight article fetches within one page.
    pub article_concurrency: usize,
}

/// Why the page loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `max_pages` pages were processed.
    PageBudget,
    /// The origin answered 404 for the next page.
    NotFound,
    /// The next page had no item rows.
    EmptyPage,
}

/// Outcome of a run: records in page order plus how the crawl ended.
#[derive(Debug)]
pub struct ScrapeReport {
    pub records: Vec<Record>,
    /// Listing pages requested, including the one that ended the run.
    pub pages_fetched: u32,
    pub stop: StopReason,
}

/// Result of following an item's link.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ArticleText {
    Extracted(String),
    Unavailable,
}

/// Crawl one section and return its enriched records.
///
/// # Errors
///
/// Returns the fetcher's error when a listing page cannot be retrieved at
/// all. Records gathered before that point are discarded with it.
#[instrument(level = "info", skip_all, fields(section = %opts.section, start_page = opts.start_page, max_pages = opts.max_pages))]
pub async fn scrape<F: Fetch>(fetcher: &F, opts: &ScrapeOptions) -> Result<ScrapeReport, FetchError> {
    let layout = opts.section.layout();
    let mut records = Vec::new();
    let mut page = opts.start_page;
    let mut pages_done = 0u32;
    let mut pages_fetched = 0u32;

    let stop = loop {
        if pages_done >= opts.max_pages {
            break StopReason::PageBudget;
        }

        let url = listing_url(opts.section, page);
        let resp = fetcher.get(&url, LISTING_TIMEOUT).await?;
        pages_fetched += 1;
        if !resp.is_ok() {
            warn!(status = resp.status, %url, "Listing page returned non-200");
            if resp.status == 404 {
                break StopReason::NotFound;
            }
        }

        let rows = layout.extract(&resp.body);
        if rows.is_empty() {
            info!(page, %url, "Listing page has no items; end of listing");
            break StopReason::EmptyPage;
        }

        let row_count = rows.len();
        let enriched: Vec<Record> = stream::iter(rows)
            .map(|row| enrich_row(fetcher, opts, page, row))
            .buffered(opts.article_concurrency.max(1))
            .collect()
            .await;
        records.extend(enriched);
        info!(page, rows = row_count, total = records.len(), "Scraped listing page");

        pages_done += 1;
        page += 1;
        if !opts.delay.is_zero() {
            sleep(opts.delay).await;
        }
    };

    info!(?stop, pages_fetched, records = records.len(), "Scrape finished");
    Ok(ScrapeReport {
        records,
        pages_fetched,
        stop,
    })
}

/// Turn one raw listing row into a record.
async fn enrich_row<F: Fetch>(fetcher: &F, opts: &ScrapeOptions, page: u32, row: RawRow) -> Record {
    let title = normalize_space(&row.title);
    let summary = normalize_space(&row.summary);
    let date_raw = normalize_space(&row.date);
    let date = normalize_date(&date_raw);
    let category = categorize(&title, &summary);
    debug!(title = %truncate_for_log(&title, 80), date_iso = %date.iso, category, "Classified row");

    let mut article_text = String::new();
    let mut article_summary = String::new();
    if opts.fetch_article && !row.href.is_empty() {
        if let ArticleText::Extracted(text) = fetch_article_text(fetcher, &row.href).await {
            article_text = text;
        }
    }
    if opts.summarize {
        if !article_text.is_empty() {
            article_summary = summarize(&article_text, opts.summary_sentences);
        }
        if article_summary.is_empty() && !summary.is_empty() {
            article_summary = summarize(&summary, opts.summary_sentences);
        }
    }

    Record {
        section: opts.section,
        page,
        title,
        date_raw,
        date_iso: date.iso,
        year: date.year,
        month: date.month,
        category: category.to_string(),
        url: row.href,
        summary,
        article_summary,
        article_text,
    }
}

/// Best-effort article retrieval; every failure maps to [`ArticleText::Unavailable`].
#[instrument(level = "debug", skip(fetcher))]
async fn fetch_article_text<F: Fetch>(fetcher: &F, url: &str) -> ArticleText {
    match fetcher.get(url, ARTICLE_TIMEOUT).await {
        Ok(resp) if resp.is_ok() => ArticleText::Extracted(extract_main_text(&resp.body)),
        Ok(resp) => {
            debug!(status = resp.status, "Article page returned non-200; skipping");
            ArticleText::Unavailable
        }
        Err(e) => {
            warn!(error = %e, "Article fetch failed; skipping");
            ArticleText::Unavailable
        }
    }
}
