//! HTTP fetching with exponential backoff retry logic.
//!
//! This module provides the narrow interface the crawler uses to talk to the
//! remote origin. It includes automatic retry with exponential backoff and
//! jitter for transient failures.
//!
//! # Architecture
//!
//! The module uses a trait-based design for flexibility:
//! - [`Fetch`]: Core trait defining an async `GET(url, timeout) -> (status, body)`
//! - [`HttpFetcher`]: reqwest client with desktop browser headers
//! - [`RetryFetch`]: Decorator that adds retry logic to any `Fetch` implementation
//!
//! # Retry Strategy
//!
//! - Retried on transport errors and on status 429, 500, 502, 503, 504
//! - Never retried: invalid or non-HTTP URLs
//! - Maximum 5 attempts in total
//! - Exponential backoff starting at 600 ms, capped at 30 seconds
//! - Random jitter (0-250ms) added to each delay
//!
//! Any other status is returned to the caller untouched, which applies its
//! own policy. When the attempts run out on a retryable status, the last
//! response is returned as-is.

use rand::{Rng, rng};
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, error, instrument, warn};
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/122.0.0.0 Safari/537.36";

/// Status codes worth another attempt.
pub const RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} failed: {message}")]
    Other { url: String, message: String },
}

impl FetchError {
    /// Whether another attempt could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }
}

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Trait for async page retrieval.
///
/// Implementors perform a single safe, idempotent GET. A non-200 status is
/// not an error at this level.
pub trait Fetch {
    async fn get(&self, url: &str, timeout: Duration) -> Result<Response, FetchError>;
}

/// reqwest-backed [`Fetch`] that presents itself as a desktop browser.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self, timeout))]
    async fn get(&self, url: &str, timeout: Duration) -> Result<Response, FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };
        let parsed = Url::parse(url).map_err(|e| FetchError::Other {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::Other {
                url: url.to_string(),
                message: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }

        let t0 = Instant::now();
        let resp = self.client.get(url).timeout(timeout).send().await.map_err(transport)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(transport)?;
        debug!(
            status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u128,
            "GET complete"
        );
        Ok(Response { status, body })
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`Fetch`] implementation.
///
/// # Backoff Strategy
///
/// The delay before retry number `n` follows this formula:
/// ```text
/// delay = min(base_delay * 2^(n-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryFetch<T> {
    /// The underlying fetcher to wrap.
    inner: T,
    /// Total attempts including the first one.
    max_attempts: usize,
    /// Delay before the first retry (doubles with each attempt).
    base_delay: Duration,
    /// Maximum delay cap to prevent excessive waiting.
    max_delay: Duration,
}

impl<T> RetryFetch<T>
where
    T: Fetch,
{
    /// Create a new retry wrapper around an existing [`Fetch`] implementation.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let fetcher = RetryFetch::new(HttpFetcher::new()?, 5, Duration::from_millis(600));
    /// ```
    pub fn new(inner: T, max_attempts: usize, base_delay: Duration) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay: Duration::from_secs(30),
        }
    }

    fn backoff(&self, retry: usize) -> Duration {
        let shift = (retry - 1).min(16) as u32;
        let delay = self.base_delay.saturating_mul(1 << shift).min(self.max_delay);
        let jitter_ms: u64 = rng().random_range(0..=250);
        delay + Duration::from_millis(jitter_ms)
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_attempts", &self.max_attempts)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> Fetch for RetryFetch<T>
where
    T: Fetch,
{
    #[instrument(level = "debug", skip(self, timeout))]
    async fn get(&self, url: &str, timeout: Duration) -> Result<Response, FetchError> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            attempt += 1;
            let result = self.inner.get(url, timeout).await;
            let retry_reason = match &result {
                Ok(resp) if RETRY_STATUSES.contains(&resp.status) => Some(format!("HTTP {}", resp.status)),
                Ok(_) => None,
                Err(e) if e.is_transient() => Some(e.to_string()),
                Err(_) => None,
            };
            let Some(reason) = retry_reason else {
                return result;
            };

            if attempt >= self.max_attempts {
                error!(
                    attempt,
                    max = self.max_attempts,
                    elapsed_ms_total = total_t0.elapsed().as_millis() as u128,
                    %reason,
                    "GET exhausted retries"
                );
                return result;
            }

            let delay = self.backoff(attempt);
            warn!(
                attempt,
                max = self.max_attempts,
                elapsed_ms_total = total_t0.elapsed().as_millis() as u128,
                ?delay,
                %reason,
                "GET attempt failed; backing off"
            );
            sleep(delay).await;
        }
    }
}
