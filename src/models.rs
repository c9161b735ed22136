//! Data models for listing rows and the records built from them.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Section`]: Which part of the FAO Gender site a run crawls
//! - [`RawRow`]: One item container as pulled out of a listing page
//! - [`Record`]: An enriched, immutable output item
//!
//! Records serialize with snake_case field names; the same names are used as
//! CSV column headers and JSON keys.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A listing section of the FAO Gender site.
///
/// The section is fixed for the lifetime of a run and decides both the
/// listing URL and which extractor parses the pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    News,
    Insights,
    SuccessStories,
    #[value(name = "e-learning")]
    #[serde(rename = "e-learning")]
    ELearning,
    Publications,
}

impl Section {
    /// Stable identifier used on the command line and in output files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::News => "news",
            Section::Insights => "insights",
            Section::SuccessStories => "success-stories",
            Section::ELearning => "e-learning",
            Section::Publications => "publications",
        }
    }

    /// Path fragment after `/gender/` in the listing URL.
    pub fn path(&self) -> &'static str {
        match self {
            Section::News => "news",
            Section::Insights => "insights",
            Section::SuccessStories => "success-stories",
            Section::ELearning => "resources/e-learning",
            Section::Publications => "resources/publications",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item container pulled out of a listing page, before any cleanup.
///
/// Rows are transient: the controller turns each one into a [`Record`] and
/// drops it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub title: String,
    pub date: String,
    /// Absolute URL when the page linked with a root-relative path.
    pub href: String,
    pub summary: String,
}

impl RawRow {
    /// A row with every field empty is layout noise, not data.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.date.is_empty() && self.href.is_empty() && self.summary.is_empty()
    }
}

/// An enriched listing item, the unit of output.
///
/// `date_iso`, `year` and `month` are either all populated or all empty/zero.
/// `category` is never empty. The article fields stay empty unless deep-fetch
/// or summarization produced something.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub section: Section,
    /// 1-based listing page the item was found on.
    pub page: u32,
    pub title: String,
    /// Date text as scraped, whitespace-collapsed.
    #[serde(rename = "date")]
    pub date_raw: String,
    pub date_iso: String,
    pub year: i32,
    pub month: u32,
    pub category: String,
    pub url: String,
    pub summary: String,
    #[serde(default)]
    pub article_summary: String,
    #[serde(default)]
    pub article_text: String,
}

impl Record {
    /// Numeric `YYYYMMDD` from `date_iso`, or 0 when the date is unknown.
    pub fn date_key(&self) -> u32 {
        if self.date_iso.is_empty() {
            return 0;
        }
        self.date_iso.replace('-', "").parse().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date_iso: &str) -> Record {
        Record {
            section: Section::News,
            page: 1,
            title: "Women lead seed banks".to_string(),
            date_raw: "15 March 2024".to_string(),
            date_iso: date_iso.to_string(),
            year: 2024,
            month: 3,
            category: "Gender and plant production and protection".to_string(),
            url: "https://www.fao.org/gender/news/detail/seed-banks/en".to_string(),
            summary: "Seed banks run by women.".to_string(),
            article_summary: String::new(),
            article_text: String::new(),
        }
    }

    #[test]
    fn test_section_identifiers() {
        assert_eq!(Section::SuccessStories.as_str(), "success-stories");
        assert_eq!(Section::ELearning.as_str(), "e-learning");
        assert_eq!(Section::ELearning.path(), "resources/e-learning");
        assert_eq!(Section::Publications.path(), "resources/publications");
        assert_eq!(Section::News.to_string(), "news");
    }

    #[test]
    fn test_section_value_enum_names_match_identifiers() {
        for section in Section::value_variants() {
            let value = section.to_possible_value().unwrap();
            assert_eq!(value.get_name(), section.as_str());
        }
    }

    #[test]
    fn test_section_serializes_as_identifier() {
        let json = serde_json::to_string(&Section::ELearning).unwrap();
        assert_eq!(json, "\"e-learning\"");
    }

    #[test]
    fn test_raw_row_is_empty() {
        assert!(RawRow::default().is_empty());
        let row = RawRow {
            date: "1 May 2024".to_string(),
            ..RawRow::default()
        };
        assert!(!row.is_empty());
    }

    #[test]
    fn test_date_key() {
        assert_eq!(record("2024-03-15").date_key(), 20240315);
        assert_eq!(record("").date_key(), 0);
    }

    #[test]
    fn test_record_serializes_date_raw_as_date() {
        let json = serde_json::to_value(record("2024-03-15")).unwrap();
        assert_eq!(json["date"], "15 March 2024");
        assert_eq!(json["section"], "news");
        assert!(json.get("date_raw").is_none());
    }
}
