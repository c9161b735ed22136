//! Output generation for the scraped record set.
//!
//! Records are sorted once and then written in two shapes that carry the same
//! data:
//!
//! # Submodules
//!
//! - [`tabular`]: CSV with a fixed column order, every field quoted
//! - [`json`]: `{generated_at, count, items}` document
//!
//! # Output Structure
//!
//! ```text
//! public/
//! ├── news.csv
//! └── news.json
//! ```

pub mod json;
pub mod tabular;

use crate::models::Record;
use std::cmp::Reverse;
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

/// Sort newest first, then by section and title (both case-insensitive, descending).
///
/// Records without a date sort last. The sort is stable.
pub fn sort_records(records: &mut [Record]) {
    records.sort_by_cached_key(|r| Reverse((r.date_key(), r.section.as_str().to_lowercase(), r.title.to_lowercase())));
}

/// Sort `records` and write both output files.
#[instrument(level = "info", skip_all, fields(csv = %csv_path.display(), json = %json_path.display(), count = records.len()))]
pub async fn write_outputs(mut records: Vec<Record>, csv_path: &Path, json_path: &Path) -> Result<(), Box<dyn Error>> {
    sort_records(&mut records);
    tabular::write_csv(&records, csv_path).await?;
    json::write_json(&records, json_path).await?;
    info!("Wrote CSV and JSON outputs");
    Ok(())
}
