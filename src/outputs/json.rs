//! JSON output.
//!
//! The document wraps the records with a UTC generation timestamp and a count:
//!
//! ```text
//! {
//!   "generated_at": "2025-05-06T08:00:00Z",
//!   "count": 2,
//!   "items": [ { "section": "news", ... }, ... ]
//! }
//! ```
//!
//! Non-ASCII text is written as-is.

use crate::models::Record;
use chrono::Utc;
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

#[derive(Debug, Serialize)]
struct Export<'a> {
    generated_at: String,
    count: usize,
    items: &'a [Record],
}

/// Render records, in the given order, to a pretty-printed JSON document.
pub fn render_json(records: &[Record]) -> Result<String, serde_json::Error> {
    let export = Export {
        generated_at: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        count: records.len(),
        items: records,
    };
    serde_json::to_string_pretty(&export)
}

/// Write records to `path` as JSON.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_json(records: &[Record], path: &Path) -> Result<(), Box<dyn Error>> {
    let json = render_json(records)?;
    fs::write(path, json).await?;
    info!(items = records.len(), "Wrote JSON");
    Ok(())
}
