//! Page scrapers for the FAO Gender site.
//!
//! The crawler reads two kinds of pages:
//!
//! 1. **Listings**: paginated indexes of items, parsed by [`listing`]
//! 2. **Articles**: the page an item links to, reduced to its main text by [`article`]
//!
//! # Listing Layouts
//!
//! | Section | Layout | Item container |
//! |---------|--------|----------------|
//! | news, insights, success-stories, publications | [`Layout::Generic`] | `div.d-list-content` |
//! | e-learning | [`Layout::Card`] | `div.card.card-elearning div.card-body` |
//!
//! The layout is a pure function of the section, chosen once per run.
//!
//! # URL Pattern
//!
//! Page 1 of a section is `https://www.fao.org/gender/<path>/en`, page `n`
//! is `https://www.fao.org/gender/<path>/<n>/en`.

pub mod article;
pub mod listing;

use crate::models::{RawRow, Section};
use itertools::Itertools;
use scraper::ElementRef;

/// Origin every root-relative link is resolved against.
pub const BASE: &str = "https://www.fao.org";

/// Structural variant of a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Title/date/summary blocks used by news, insights, success stories and publications.
    Generic,
    /// Bootstrap cards used by the e-learning catalogue.
    Card,
}

impl Layout {
    /// Parse a listing page into rows in document order.
    pub fn extract(self, html: &str) -> Vec<RawRow> {
        match self {
            Layout::Generic => listing::parse_generic(html),
            Layout::Card => listing::parse_cards(html),
        }
    }
}

impl Section {
    pub fn layout(&self) -> Layout {
        match self {
            Section::ELearning => Layout::Card,
            Section::News | Section::Insights | Section::SuccessStories | Section::Publications => Layout::Generic,
        }
    }
}

/// Canonical listing URL for `page` of `section`.
pub fn listing_url(section: Section, page: u32) -> String {
    if page == 1 {
        format!("{BASE}/gender/{}/en", section.path())
    } else {
        format!("{BASE}/gender/{}/{page}/en", section.path())
    }
}

/// Prefix a link starting with `/` with [`BASE`]; anything else is returned unchanged.
///
/// The path is kept byte for byte, so `//host/x` stays on the FAO origin.
pub fn resolve_href(href: &str) -> String {
    let href = href.trim();
    if href.starts_with('/') {
        format!("{BASE}{href}")
    } else {
        href.to_string()
    }
}

/// Text content of an element with each text node trimmed and joined by a space.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_url_first_page() {
        assert_eq!(listing_url(Section::News, 1), "https://www.fao.org/gender/news/en");
        assert_eq!(
            listing_url(Section::ELearning, 1),
            "https://www.fao.org/gender/resources/e-learning/en"
        );
    }

    #[test]
    fn test_listing_url_later_pages() {
        assert_eq!(listing_url(Section::Insights, 2), "https://www.fao.org/gender/insights/2/en");
        assert_eq!(
            listing_url(Section::Publications, 61),
            "https://www.fao.org/gender/resources/publications/61/en"
        );
    }

    #[test]
    fn test_layout_dispatch() {
        assert_eq!(Section::ELearning.layout(), Layout::Card);
        for section in [Section::News, Section::Insights, Section::SuccessStories, Section::Publications] {
            assert_eq!(section.layout(), Layout::Generic);
        }
    }

    #[test]
    fn test_resolve_href() {
        assert_eq!(
            resolve_href("/gender/news/detail/seed-banks/en"),
            "https://www.fao.org/gender/news/detail/seed-banks/en"
        );
        assert_eq!(
            resolve_href("https://elearning.fao.org/course/view.php?id=1"),
            "https://elearning.fao.org/course/view.php?id=1"
        );
        assert_eq!(resolve_href("detail/relative"), "detail/relative");
        assert_eq!(resolve_href(""), "");
    }

    #[test]
    fn test_resolve_href_stays_on_base_origin() {
        assert_eq!(
            resolve_href("//cdn.example.org/files/report.pdf"),
            "https://www.fao.org//cdn.example.org/files/report.pdf"
        );
        assert_eq!(
            resolve_href("/gender/news/detail/a/../b/en"),
            "https://www.fao.org/gender/news/detail/a/../b/en"
        );
        assert_eq!(resolve_href("/gender/news/caf%C3%A9 day/en"), "https://www.fao.org/gender/news/caf%C3%A9 day/en");
    }
}
