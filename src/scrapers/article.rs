//! Main-text extraction for linked article pages.
//!
//! Article templates vary across the site, so extraction is heuristic:
//! chrome (scripts, navigation, share widgets, ...) is removed from the tree,
//! then a list of likely body containers is tried and the one yielding the
//! most paragraph text wins.

use super::element_text;
use crate::utils::normalize_space;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

/// Elements removed before any text is collected.
static CHROME: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(
        "script, style, nav, header, footer, aside, form, noscript, div.share, div.social, ul.share-buttons",
    )
    .unwrap()
});

/// Likely article bodies, most specific first.
const CANDIDATES: &[&str] = &[
    "article",
    "main article",
    "main .article",
    "div.article",
    "div.article-content",
    "div.entry-content",
    "div#content",
    "main",
    "section.content",
    "div.content",
    "div.text",
    "div#main-content",
];

static CANDIDATE_SELECTORS: Lazy<Vec<Selector>> =
    Lazy::new(|| CANDIDATES.iter().map(|s| Selector::parse(s).unwrap()).collect());

static BLOCKS: Lazy<Selector> = Lazy::new(|| Selector::parse("p, li").unwrap());
static PARAGRAPHS: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Extract the best-candidate main text of an article page.
///
/// Returns whitespace-normalized text, possibly empty.
#[instrument(level = "debug", skip_all, fields(bytes = html.len()))]
pub fn extract_main_text(html: &str) -> String {
    let mut document = Html::parse_document(html);
    strip_chrome(&mut document);
    let root = document.root_element();

    let mut best = String::new();
    let mut best_chars = 0;
    for selector in CANDIDATE_SELECTORS.iter() {
        let Some(node) = root.select(selector).next() else {
            continue;
        };
        let text = join_blocks(node.select(&BLOCKS));
        let chars = text.chars().count();
        if chars > best_chars {
            best = text;
            best_chars = chars;
        }
    }
    if best.is_empty() {
        best = join_blocks(root.select(&PARAGRAPHS));
    }

    let text = normalize_space(&best);
    debug!(chars = text.chars().count(), "Extracted article text");
    text
}

/// Detach every chrome element from the tree so later selections skip it.
fn strip_chrome(document: &mut Html) {
    let ids: Vec<_> = document.select(&CHROME).map(|el| el.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn join_blocks<'a>(blocks: impl Iterator<Item = ElementRef<'a>>) -> String {
    blocks.map(element_text).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_longest_candidate() {
        let html = r#"
            <html><body>
              <header><p>Site header text that should never appear</p></header>
              <div class="content"><p>Short teaser.</p></div>
              <article>
                <h1>Title</h1>
                <p>Rural women lead   seed banks.</p>
                <ul><li>First point</li><li>Second point</li></ul>
                <div class="share"><p>Share on social media</p></div>
                <script>var tracking = 1;</script>
              </article>
              <footer><p>Footer</p></footer>
            </body></html>
        "#;
        assert_eq!(
            extract_main_text(html),
            "Rural women lead seed banks. First point Second point"
        );
    }

    #[test]
    fn test_falls_back_to_all_paragraphs() {
        let html = r#"
            <html><body>
              <nav><p>Menu</p></nav>
              <div class="wrapper"><p>First paragraph.</p></div>
              <p>Second paragraph.</p>
            </body></html>
        "#;
        assert_eq!(extract_main_text(html), "First paragraph. Second paragraph.");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(extract_main_text(""), "");
        assert_eq!(extract_main_text("<html><body><div>No paragraphs</div></body></html>"), "");
    }

    #[test]
    fn test_stripped_elements_never_count() {
        let html = r#"
            <html><body>
              <main>
                <aside><p>A very long related-links block that is much longer than the body text.</p></aside>
                <p>Body.</p>
              </main>
            </body></html>
        "#;
        assert_eq!(extract_main_text(html), "Body.");
    }

    #[test]
    fn test_longest_candidate_counts_characters() {
        // Eight curly quotes are 24 bytes but only 8 characters.
        let html = "<html><body><main><p>Twelve chars</p></main><article><p>’’’’’’’’</p></article></body></html>";
        assert_eq!(extract_main_text(html), "Twelve chars");

        let html = "<html><body><main><p>Zoe Muller!</p></main><article><p>Zoë Müller</p></article></body></html>";
        assert_eq!(extract_main_text(html), "Zoe Muller!");
    }
}
