//! CSV output.
//!
//! The file starts with a UTF-8 byte-order mark so spreadsheet tools pick the
//! right encoding, quotes every field and ends rows with CRLF. The header row
//! is always written, even for an empty record set.

use crate::models::{Record, Section};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Column order of the tabular output.
pub const COLUMNS: [&str; 12] = [
    "section",
    "category",
    "title",
    "summary",
    "article_summary",
    "date",
    "date_iso",
    "year",
    "month",
    "url",
    "page",
    "article_text",
];

/// One CSV row; field order must match [`COLUMNS`].
#[derive(Serialize)]
struct Row<'a> {
    section: Section,
    category: &'a str,
    title: &'a str,
    summary: &'a str,
    article_summary: &'a str,
    date: &'a str,
    date_iso: &'a str,
    year: i32,
    month: u32,
    url: &'a str,
    page: u32,
    article_text: &'a str,
}

impl<'a> From<&'a Record> for Row<'a> {
    fn from(r: &'a Record) -> Self {
        Row {
            section: r.section,
            category: &r.category,
            title: &r.title,
            summary: &r.summary,
            article_summary: &r.article_summary,
            date: &r.date_raw,
            date_iso: &r.date_iso,
            year: r.year,
            month: r.month,
            url: &r.url,
            page: r.page,
            article_text: &r.article_text,
        }
    }
}

/// Render records, in the given order, to CSV bytes.
pub fn render_csv(records: &[Record]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(BOM.to_vec());
    wtr.write_record(COLUMNS)?;
    for record in records {
        wtr.serialize(Row::from(record))?;
    }
    Ok(wtr.into_inner().map_err(|e| e.into_error())?)
}

/// Write records to `path` as CSV.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_csv(records: &[Record], path: &Path) -> Result<(), Box<dyn Error>> {
    let bytes = render_csv(records)?;
    fs::write(path, bytes).await?;
    info!(rows = records.len(), "Wrote CSV");
    Ok(())
}

/// Parse CSV produced by [`render_csv`] back into records.
#[cfg(test)]
pub(crate) fn read_csv(bytes: &[u8]) -> Result<Vec<Record>, Box<dyn Error>> {
    let body = bytes.strip_prefix(BOM).ok_or("missing byte-order mark")?;
    let mut rdr = csv::Reader::from_reader(body);
    let mut records = Vec::new();
    for row in rdr.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
