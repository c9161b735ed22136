//! Listing page extractors.
//!
//! Both layouts walk their item containers in document order and pull a
//! title link, a date and a summary from each. Containers where all four
//! fields come out empty are dropped.

use super::{element_text, resolve_href};
use crate::models::RawRow;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

static GENERIC_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("div.d-list-content").unwrap());
static GENERIC_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h5.title-link a").unwrap());

static CARD_ITEM: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.card.card-elearning div.card-body").unwrap());
static CARD_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h5.card-title a.title-link").unwrap());
static CARD_SUMMARY: Lazy<Selector> = Lazy::new(|| Selector::parse("p.card-text").unwrap());

static DATE: Lazy<Selector> = Lazy::new(|| Selector::parse("h6.date").unwrap());

/// Parse the generic layout (news, insights, success stories, publications).
///
/// The summary is the first `div` nested anywhere inside the item container.
#[instrument(level = "debug", skip_all, fields(bytes = html.len()))]
pub fn parse_generic(html: &str) -> Vec<RawRow> {
    let document = Html::parse_document(html);
    let rows: Vec<RawRow> = document
        .select(&GENERIC_ITEM)
        .filter_map(|item| {
            let summary = item
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "div");
            build_row(
                item.select(&GENERIC_TITLE).next(),
                item.select(&DATE).next(),
                summary,
            )
        })
        .collect();
    debug!(rows = rows.len(), "Parsed generic listing");
    rows
}

/// Parse the e-learning card layout.
#[instrument(level = "debug", skip_all, fields(bytes = html.len()))]
pub fn parse_cards(html: &str) -> Vec<RawRow> {
    let document = Html::parse_document(html);
    let rows: Vec<RawRow> = document
        .select(&CARD_ITEM)
        .filter_map(|card| {
            build_row(
                card.select(&CARD_TITLE).next(),
                card.select(&DATE).next(),
                card.select(&CARD_SUMMARY).next(),
            )
        })
        .collect();
    debug!(rows = rows.len(), "Parsed e-learning cards");
    rows
}

fn build_row(
    title: Option<ElementRef<'_>>,
    date: Option<ElementRef<'_>>,
    summary: Option<ElementRef<'_>>,
) -> Option<RawRow> {
    let row = RawRow {
        title: title.map(element_text).unwrap_or_default(),
        href: title
            .and_then(|a| a.value().attr("href"))
            .map(resolve_href)
            .unwrap_or_default(),
        date: date.map(element_text).unwrap_or_default(),
        summary: summary.map(element_text).unwrap_or_default(),
    };
    (!row.is_empty()).then_some(row)
}
