//! Per-line decision: does this line look like something that was bought?
//!
//! Lines are judged in isolation. A quantity or price printed on the line
//! after an item name is not attached to it.

use larder_core::Vocabulary;

use crate::patterns::{re_date_only, re_phone, re_price_word, re_time_only};

/// Why a line was kept or dropped. Useful for diagnostics; only
/// [`is_item_line`] matters to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineVerdict {
    TooShort,
    NonGrocery,
    MostlyDigits,
    NoLetters,
    WebOrEmail,
    Phone,
    DateOrTime,
    /// Letters plus a `12.34`-style amount.
    PricedItem,
    /// Two or more mostly-alphabetic words including a grocery keyword.
    KeywordItem,
    NoSignal,
}

impl LineVerdict {
    pub fn is_item(self) -> bool {
        matches!(self, LineVerdict::PricedItem | LineVerdict::KeywordItem)
    }
}

pub fn is_item_line(line: &str, vocabulary: &Vocabulary) -> bool {
    classify_line(line, vocabulary).is_item()
}

/// Run the rejection rules in order, then the two acceptance rules.
pub fn classify_line(line: &str, vocabulary: &Vocabulary) -> LineVerdict {
    let line = line.trim();
    let lower = line.to_lowercase();
    let len = line.chars().count();

    if len < 3 {
        return LineVerdict::TooShort;
    }
    if vocabulary.mentions_non_grocery(line) {
        return LineVerdict::NonGrocery;
    }

    let digits = line.chars().filter(|c| c.is_numeric()).count();
    if digits as f64 > len as f64 * 0.7 {
        return LineVerdict::MostlyDigits;
    }
    let letters = line.chars().filter(|c| c.is_alphabetic()).count();
    if letters == 0 {
        return LineVerdict::NoLetters;
    }

    if lower.contains("www.") || lower.contains(".com") || (lower.contains('@') && !lower.contains(' ')) {
        return LineVerdict::WebOrEmail;
    }
    if lower.contains("phone") || lower.contains("tel") || re_phone().is_match(&lower) {
        return LineVerdict::Phone;
    }
    if re_date_only().is_match(line) || re_time_only().is_match(line) {
        return LineVerdict::DateOrTime;
    }

    if line.chars().any(|c| c.is_ascii_alphabetic()) && re_price_word().is_match(line) {
        return LineVerdict::PricedItem;
    }
    if line.split_whitespace().count() >= 2
        && letters as f64 > len as f64 * 0.5
        && vocabulary.mentions_grocery(line)
    {
        return LineVerdict::KeywordItem;
    }

    LineVerdict::NoSignal
}
