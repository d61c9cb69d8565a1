use regex::Regex;
use std::sync::OnceLock;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        pub(crate) fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// Line classification
re!(re_price_word, r"\d+\.\d{2}\b");
re!(re_phone, r"\d{3}[-.]\d{3}[-.]\d{4}");
re!(re_date_only, r"^\s*(\d{1,2}/\d{1,2}/\d{2,4})\s*$");
re!(re_time_only, r"^\s*(\d{1,2}:\d{2}(:\d{2})?\s*(am|pm)?)\s*$");

// Item name cleanup
re!(re_trailing_price, r"\s+\d+\.\d{2}(\s+[A-Z]){0,2}\s*$");
re!(re_unit_price, r"\s+@\s+\d+\.\d+");
re!(re_leading_quantity, r"(?i)^(\d+(?:\.\d+)?)\s*(?:ct|lb|kg|oz|ea|x)?\s+(.+)");
re!(re_long_number, r"\b\d{4,}\b");
re!(re_multiplier_prefix, r"(?i)^\d+\s*X\s+");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        re_price_word();
        re_phone();
        re_date_only();
        re_time_only();
        re_trailing_price();
        re_unit_price();
        re_leading_quantity();
        re_long_number();
        re_multiplier_prefix();
    }

    #[test]
    fn price_word_needs_exactly_two_decimals_at_boundary() {
        assert!(re_price_word().is_match("MILK 3.50"));
        assert!(re_price_word().is_match("BANANAS 1.29 F"));
        assert!(!re_price_word().is_match("3.50F"));
        assert!(!re_price_word().is_match("MILK 3.505"));
        assert!(!re_price_word().is_match("MILK 3.5"));
    }

    #[test]
    fn time_suffix_is_lowercase_only() {
        assert!(re_time_only().is_match("10:30 am"));
        assert!(re_time_only().is_match(" 10:30:15 "));
        assert!(!re_time_only().is_match("10:30 AM"));
    }
}
