//! Turn an accepted receipt line into a candidate item name and quantity.
//!
//! Cleanup runs as a fixed sequence of small string transforms. Each step
//! trims its output so the next one sees no leading or trailing whitespace.

use crate::patterns::{
    re_leading_quantity, re_long_number, re_multiplier_prefix, re_trailing_price, re_unit_price,
};

/// A line reduced to what was bought, before grocery filtering and title-casing.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub quantity: f64,
}

type Step = fn(&str) -> String;

/// Applied before the leading quantity is split off.
const BEFORE_QUANTITY: &[Step] = &[strip_trailing_price, strip_unit_price];

/// Applied to the name left over after the quantity split.
const AFTER_QUANTITY: &[Step] = &[strip_long_codes, strip_multiplier_prefix, collapse_whitespace];

/// Parse a line the classifier accepted. Returns `None` when the cleaned
/// name is too short or has no letters.
pub fn parse_candidate(line: &str) -> Option<Candidate> {
    let cleaned = run(BEFORE_QUANTITY, line.trim());
    let (quantity, name) = split_leading_quantity(&cleaned);
    let name = run(AFTER_QUANTITY, &name);

    is_plausible_name(&name).then_some(Candidate { name, quantity })
}

fn run(steps: &[Step], input: &str) -> String {
    steps.iter().fold(input.to_string(), |acc, step| step(&acc))
}

/// `"BANANAS 1.29 F"` → `"BANANAS"`. Removes a trailing amount with exactly
/// two decimals plus up to two single-letter tax/status codes.
pub fn strip_trailing_price(s: &str) -> String {
    re_trailing_price().replace_all(s, "").trim().to_string()
}

/// `"APPLES @ 0.99"` → `"APPLES"`.
pub fn strip_unit_price(s: &str) -> String {
    re_unit_price().replace_all(s, "").trim().to_string()
}

/// Split an optional leading number (and unit word) from the rest of the
/// name. Falls back to a quantity of 1 and the whole input.
///
/// A leading number that is zero or not finite does not count as a quantity.
pub fn split_leading_quantity(s: &str) -> (f64, String) {
    if let Some(caps) = re_leading_quantity().captures(s) {
        let number = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let rest = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        if let Ok(quantity) = number.parse::<f64>() {
            if quantity.is_finite() && quantity > 0.0 {
                return (quantity, rest.trim().to_string());
            }
        }
    }
    (1.0, s.to_string())
}

/// Drop standalone numbers of four or more digits (UPC/SKU codes).
pub fn strip_long_codes(s: &str) -> String {
    re_long_number().replace_all(s, "").trim().to_string()
}

/// Drop a `"2 X "` multiplier still left at the front.
pub fn strip_multiplier_prefix(s: &str) -> String {
    re_multiplier_prefix().replace(s, "").trim().to_string()
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Longer than two characters and at least one letter.
pub fn is_plausible_name(name: &str) -> bool {
    name.chars().count() > 2 && name.chars().any(char::is_alphabetic)
}

/// Upper-case the first letter of every run of letters and lower-case the
/// rest: `"ORGANIC MILK"` → `"Organic Milk"`, `"7UP"` → `"7Up"`,
/// `"O'BRIEN"` → `"O'Brien"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
