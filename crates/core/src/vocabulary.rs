use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::config::ConfigError;

const GROCERY_KEYWORDS: &[&str] = &[
    "milk", "bread", "eggs", "cheese", "yogurt", "butter", "fruit", "vegetable",
    "apple", "banana", "orange", "potato", "tomato", "onion", "chicken", "beef",
    "pork", "fish", "rice", "pasta", "cereal", "flour", "sugar", "salt", "oil",
    "coffee", "tea", "juice", "soda", "water", "snack", "chips", "cookie", "frozen",
    "organic", "whole", "grain", "lean", "low fat", "gluten free", "canned",
    "beans", "lettuce", "spinach", "broccoli", "carrot", "berry", "berries", "paneer",
];

const NON_GROCERY_INDICATORS: &[&str] = &[
    "CLOTHING", "APPAREL", "SHOES", "ELECTRONICS", "TOYS", "BOOKS", "GIFT CARD",
    "PHARMACY", "PRESCRIPTION", "OTC MED", "TAX", "BAG FEE", "TOTAL", "SUBTOTAL",
    "CASH", "CREDIT", "DEBIT", "CHANGE", "SAVINGS", "LOYALTY", "MEMBER", "BALANCE",
    "TRANSACTION", "AUTH CODE", "PIN VERIFIED", "REFUND", "CUSTOMER COPY", "STORE COPY",
];

/// Keyword tables shared read-only by the line classifier and the grocery filter.
///
/// All entries are stored lower-cased; every lookup is a case-insensitive
/// substring test, so `"berry"` matches both `"BLUEBERRY"` and `"Strawberry"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vocabulary {
    grocery_keywords: Vec<String>,
    non_grocery_indicators: Vec<String>,
}

/// On-disk form. Absent tables fall back to the builtin lists.
#[derive(Debug, Default, Deserialize)]
struct VocabularyFile {
    grocery_keywords: Option<Vec<String>>,
    non_grocery_indicators: Option<Vec<String>>,
}

impl Vocabulary {
    pub fn new<G, N>(grocery_keywords: G, non_grocery_indicators: N) -> Result<Self, ConfigError>
    where
        G: IntoIterator,
        G::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        Ok(Self {
            grocery_keywords: normalize_table("grocery_keywords", grocery_keywords)?,
            non_grocery_indicators: normalize_table("non_grocery_indicators", non_grocery_indicators)?,
        })
    }

    /// The default tables, built once per process.
    pub fn builtin() -> &'static Vocabulary {
        static BUILTIN: OnceLock<Vocabulary> = OnceLock::new();
        BUILTIN.get_or_init(|| Vocabulary {
            grocery_keywords: GROCERY_KEYWORDS.iter().map(|k| k.to_lowercase()).collect(),
            non_grocery_indicators: NON_GROCERY_INDICATORS
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let file: VocabularyFile = toml::from_str(content)?;
        let builtin = Self::builtin();
        Self::new(
            file.grocery_keywords.unwrap_or_else(|| builtin.grocery_keywords.clone()),
            file.non_grocery_indicators
                .unwrap_or_else(|| builtin.non_grocery_indicators.clone()),
        )
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn grocery_keywords(&self) -> &[String] {
        &self.grocery_keywords
    }

    pub fn non_grocery_indicators(&self) -> &[String] {
        &self.non_grocery_indicators
    }

    /// True when any grocery keyword occurs anywhere in `text`.
    pub fn mentions_grocery(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.grocery_keywords.iter().any(|k| lower.contains(k.as_str()))
    }

    /// True when any non-grocery indicator occurs anywhere in `text`.
    pub fn mentions_non_grocery(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.non_grocery_indicators.iter().any(|k| lower.contains(k.as_str()))
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn normalize_table<I>(table: &str, entries: I) -> Result<Vec<String>, ConfigError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                Err(ConfigError::InvalidVocabulary(format!("empty entry in {table}")))
            } else {
                Ok(entry.to_lowercase())
            }
        })
        .collect()
}
