//! Frequency-based extractive summarization.
//!
//! A summary is a subsequence of the original sentences. Sentences are scored
//! by the summed corpus frequency of their content words; the best `n` are
//! kept and put back in their original order.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z']+").unwrap());

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    "a an the and or but if while of for on in at to from by with as is are was were be been being \
     this that those these it its they them their we our you your he she his her not no yes do does did"
        .split_whitespace()
        .collect()
});

/// Split text into sentences at `.`, `!` or `?` followed by whitespace.
///
/// The punctuation stays with its sentence; blank pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let Some(&(end, next)) = chars.peek() else {
            break;
        };
        if !next.is_whitespace() {
            continue;
        }
        sentences.push(&text[start..end]);
        while chars.next_if(|&(_, w)| w.is_whitespace()).is_some() {}
        start = chars.peek().map_or(text.len(), |&(i, _)| i);
    }
    sentences.push(&text[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    WORD.find_iter(text).map(|m| m.as_str())
}

/// Summarize `text` into at most `max_sentences` of its own sentences.
///
/// Text with no more sentences than requested comes back with its sentences
/// joined by single spaces. Otherwise the top-scoring sentences win, ties going
/// to the earlier sentence. Empty text gives an empty summary.
pub fn summarize(text: &str, max_sentences: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.len() <= max_sentences {
        return sentences.join(" ");
    }

    let lower = text.to_lowercase();
    let mut freq: HashMap<&str, usize> = HashMap::new();
    for word in words(&lower) {
        if word.len() <= 2 || STOP_WORDS.contains(word) {
            continue;
        }
        *freq.entry(word).or_insert(0) += 1;
    }

    let mut scored: Vec<(usize, usize)> = sentences
        .iter()
        .enumerate()
        .map(|(idx, sentence)| {
            let lower = sentence.to_lowercase();
            let score: usize = words(&lower).map(|w| freq.get(w).copied().unwrap_or(0)).sum();
            (score, idx)
        })
        .collect();

    // Stable sort keeps earlier sentences ahead on equal scores.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    let mut top: Vec<usize> = scored.into_iter().take(max_sentences).map(|(_, idx)| idx).collect();
    top.sort_unstable();

    top.into_iter().map(|idx| sentences[idx]).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Rural women manage most seed systems. The weather was mild. \
        Seed banks give rural women control over seed varieties! Did anyone notice? \
        Women farmers share seed knowledge across rural villages.";

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("One. Two!  Three?\nFour");
        assert_eq!(sentences, vec!["One.", "Two!", "Three?", "Four"]);
    }

    #[test]
    fn test_split_keeps_inline_punctuation() {
        let sentences = split_sentences("FAO.org reports 3.5 million. Next one.");
        assert_eq!(sentences, vec!["FAO.org reports 3.5 million.", "Next one."]);
    }

    #[test]
    fn test_short_text_is_returned_verbatim() {
        let text = "Only one sentence. And a second.";
        assert_eq!(summarize(text, 2), text);
        assert_eq!(summarize(text, 8), text);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(summarize("", 3), "");
    }

    #[test]
    fn test_non_empty_input_gives_non_empty_summary() {
        assert!(!summarize("No terminal punctuation here", 1).is_empty());
        assert!(!summarize(TEXT, 1).is_empty());
    }

    #[test]
    fn test_picks_high_frequency_sentences_in_original_order() {
        let summary = summarize(TEXT, 2);
        assert_eq!(
            summary,
            "Seed banks give rural women control over seed varieties! \
             Women farmers share seed knowledge across rural villages."
        );
    }

    #[test]
    fn test_output_is_subsequence_with_bounded_length() {
        let sentences = split_sentences(TEXT);
        for n in 1..=4 {
            let summary = summarize(TEXT, n);
            let picked = split_sentences(&summary);
            assert!(picked.len() <= n);
            let mut cursor = 0;
            for sentence in picked {
                let pos = sentences[cursor..]
                    .iter()
                    .position(|s| *s == sentence)
                    .expect("summary sentence out of order or invented");
                cursor += pos + 1;
            }
        }
    }

    #[test]
    fn test_ties_prefer_earlier_sentences() {
        let text = "Alpha beta gamma. Delta epsilon zeta. Theta iota kappa.";
        assert_eq!(summarize(text, 2), "Alpha beta gamma. Delta epsilon zeta.");
    }
}
