//! Free-text date normalization.
//!
//! Listing pages print dates in whatever style the editors chose ("15 March
//! 2024", "March 15, 2024", "15/03/2024", ...). [`normalize_date`] turns them
//! into an ISO date plus year and month, or the all-empty value when nothing
//! matches. It is a best-effort heuristic, not a validator.
//!
//! Two stages run in order:
//! 1. A lenient token parser that prefers day-before-month when ambiguous
//! 2. A fixed list of explicit `chrono` formats, first full match wins

use crate::utils::normalize_space;
use chrono::{Datelike, NaiveDate};

/// Explicit patterns tried when the lenient parser gives up.
const FALLBACK_FORMATS: &[&str] = &[
    "%d %B %Y", "%d %b %Y", "%B %d, %Y", "%b %d, %Y", "%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d.%m.%Y",
];

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september", "october",
    "november", "december",
];

const WEEKDAYS: [&str; 7] = ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"];

/// Words that may surround a date without changing it.
const FILLERS: &[&str] = &["of", "on", "the", "at", "am", "pm", "utc", "gmt", "published", "posted", "updated"];

/// Result of date normalization.
///
/// Either every field is populated from a real calendar date, or the value
/// equals [`NormalizedDate::default()`] (`""`, 0, 0).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedDate {
    pub iso: String,
    pub year: i32,
    pub month: u32,
}

impl NormalizedDate {
    fn from_date(date: NaiveDate) -> Self {
        Self {
            iso: date.format("%Y-%m-%d").to_string(),
            year: date.year(),
            month: date.month(),
        }
    }
}

/// Normalize free text into `(YYYY-MM-DD, year, month)`.
///
/// Returns [`NormalizedDate::default()`] for empty input or when neither
/// stage recognises the text. Never returns a partial result.
pub fn normalize_date(raw: &str) -> NormalizedDate {
    let s = normalize_space(raw);
    if s.is_empty() {
        return NormalizedDate::default();
    }
    parse_lenient(&s)
        .or_else(|| parse_with_formats(&s))
        .filter(|d| (1..=9999).contains(&d.year()))
        .map(NormalizedDate::from_date)
        .unwrap_or_default()
}

/// Try each of the fixed formats in order; the first one matching the whole
/// string wins.
pub fn parse_with_formats(s: &str) -> Option<NaiveDate> {
    FALLBACK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

#[derive(Debug, Clone, Copy)]
struct Number {
    value: u32,
    digits: usize,
}

impl Number {
    fn is_year(&self) -> bool {
        self.digits == 4 || self.value > 31
    }
}

/// Token-based parser in the spirit of a general-purpose date parser.
///
/// Accepts month names (full, three-letter or "sept"), ordinals ("15th"),
/// weekday names and a few filler words, with `, / - .` as separators.
/// Clock times are ignored, including the `T10:30:00` tail of an ISO
/// timestamp. Numeric-only dates are read day first unless the
/// first number is a year; a month slot above 12 swaps with a day slot that
/// fits. A month name with only a year means the first of that month.
fn parse_lenient(s: &str) -> Option<NaiveDate> {
    let mut month_name: Option<u32> = None;
    let mut numbers: Vec<Number> = Vec::new();

    let tokens = s
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '/' | '-' | '.'))
        .filter(|t| !t.is_empty());

    for token in tokens {
        let token = match token.split_once(['T', 't']) {
            Some((day, time)) if time.contains(':') && is_digits(day) => day,
            _ if token.contains(':') => continue,
            _ => token,
        };
        let lower = token.to_lowercase();
        if let Some(number) = parse_number(&lower) {
            numbers.push(number);
        } else if let Some(month) = month_from_name(&lower) {
            if month_name.replace(month).is_some() {
                return None;
            }
        } else if is_weekday(&lower) || FILLERS.contains(&lower.as_str()) {
            continue;
        } else {
            return None;
        }
    }

    let (year, month, day) = match (month_name, numbers.as_slice()) {
        (Some(month), [year]) if year.is_year() => (*year, month, 1),
        (Some(month), [a, b]) => {
            if a.is_year() {
                (*a, month, b.value)
            } else {
                (*b, month, a.value)
            }
        }
        (None, [a, b, c]) => {
            if a.is_year() {
                let (month, day) = day_month_swap(b.value, c.value);
                (*a, month, day)
            } else {
                let (month, day) = day_month_swap(b.value, a.value);
                (*c, month, day)
            }
        }
        _ => return None,
    };

    let year = expand_year(year)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Swap month and day when the month slot cannot be a month but the day slot can.
fn day_month_swap(month: u32, day: u32) -> (u32, u32) {
    if month > 12 && day <= 12 { (day, month) } else { (month, day) }
}

fn expand_year(year: Number) -> Option<i32> {
    let value = i32::try_from(year.value).ok()?;
    match year.digits {
        4 => Some(value),
        1 | 2 if value < 70 => Some(2000 + value),
        1 | 2 => Some(1900 + value),
        _ => None,
    }
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn parse_number(token: &str) -> Option<Number> {
    let digits = token
        .strip_suffix("st")
        .or_else(|| token.strip_suffix("nd"))
        .or_else(|| token.strip_suffix("rd"))
        .or_else(|| token.strip_suffix("th"))
        .unwrap_or(token);
    if digits.is_empty() || digits.len() > 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(Number {
        value: digits.parse().ok()?,
        digits: digits.len(),
    })
}

fn month_from_name(token: &str) -> Option<u32> {
    if token == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .position(|name| *name == token || (token.len() == 3 && name.starts_with(token)))
        .map(|i| i as u32 + 1)
}

fn is_weekday(token: &str) -> bool {
    WEEKDAYS
        .iter()
        .any(|name| *name == token || (token.len() == 3 && name.starts_with(token)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso(raw: &str) -> String {
        normalize_date(raw).iso
    }

    #[test]
    fn test_day_month_year() {
        let date = normalize_date("15 March 2024");
        assert_eq!(date.iso, "2024-03-15");
        assert_eq!(date.year, 2024);
        assert_eq!(date.month, 3);
    }

    #[test]
    fn test_common_listing_styles() {
        assert_eq!(iso("15 Mar 2024"), "2024-03-15");
        assert_eq!(iso("March 15, 2024"), "2024-03-15");
        assert_eq!(iso("Mar. 15, 2024"), "2024-03-15");
        assert_eq!(iso("2024-03-15"), "2024-03-15");
        assert_eq!(iso("15.03.2024"), "2024-03-15");
        assert_eq!(iso("Friday, 15 March 2024"), "2024-03-15");
        assert_eq!(iso("15th of March 2024"), "2024-03-15");
        assert_eq!(iso("  15\n  March   2024 "), "2024-03-15");
        assert_eq!(iso("15 Sept 2024"), "2024-09-15");
        assert_eq!(iso("15 March 2024 10:30"), "2024-03-15");
        assert_eq!(iso("2024-03-15T10:30:00"), "2024-03-15");
        assert_eq!(iso("2024-03-15T10:30:00Z"), "2024-03-15");
    }

    #[test]
    fn test_ambiguous_numeric_prefers_day_first() {
        assert_eq!(iso("03/04/2024"), "2024-04-03");
    }

    #[test]
    fn test_numeric_month_overflow_swaps() {
        assert_eq!(iso("04/15/2024"), "2024-04-15");
    }

    #[test]
    fn test_month_and_year_only() {
        let date = normalize_date("March 2024");
        assert_eq!(date.iso, "2024-03-01");
        assert_eq!(date.month, 3);
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(iso("15 March 24"), "2024-03-15");
    }

    #[test]
    fn test_failure_is_all_empty() {
        for raw in ["", "   ", "not a date", "31 February 2024", "March", "15 March", "2024"] {
            assert_eq!(normalize_date(raw), NormalizedDate::default(), "input {raw:?}");
        }
    }

    #[test]
    fn test_result_is_whole_or_empty() {
        let inputs = [
            "15 March 2024",
            "1/1/1999",
            "garbage 12",
            "32/13/2024",
            "Dec 31, 2023",
            "0000-01-01",
            "10 Brumaire 2024",
        ];
        for raw in inputs {
            let date = normalize_date(raw);
            if date.iso.is_empty() {
                assert_eq!(date, NormalizedDate::default());
            } else {
                assert_eq!(date.iso.len(), 10);
                assert!(date.year > 0);
                assert!((1..=12).contains(&date.month));
                assert!(NaiveDate::parse_from_str(&date.iso, "%Y-%m-%d").is_ok());
            }
        }
    }

    #[test]
    fn test_fallback_formats_follow_declared_order() {
        assert_eq!(parse_with_formats("03/04/2024"), NaiveDate::from_ymd_opt(2024, 4, 3));
        assert_eq!(parse_with_formats("04/15/2024"), NaiveDate::from_ymd_opt(2024, 4, 15));
        assert_eq!(parse_with_formats("15 March 2024"), NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(parse_with_formats("March 15, 2024"), NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(parse_with_formats("15 March 2024 extra"), None);
    }
}
