use larder_core::{ExtractedItem, ReceiptResult, Vocabulary};

use crate::classify::classify_line;
use crate::grocery::is_grocery;
use crate::merge::merge;
use crate::parse::{parse_candidate, title_case};
use crate::store;

/// Turns recognized receipt text into a [`ReceiptResult`].
///
/// Holds a shared reference to the keyword tables; building one is free.
pub struct Extractor<'v> {
    vocabulary: &'v Vocabulary,
}

impl<'v> Extractor<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn extract(&self, text: &str) -> ReceiptResult {
        let store_name = store::identify(text);
        let items = self.extract_items(text);
        tracing::debug!(store = ?store_name, items = items.len(), "receipt text extracted");
        ReceiptResult::new(store_name, items, text)
    }

    /// Classify, parse and filter every line, then merge duplicates.
    pub fn extract_items(&self, text: &str) -> Vec<ExtractedItem> {
        merge(text.lines().filter_map(|line| self.item_from_line(line)))
    }

    fn item_from_line(&self, line: &str) -> Option<ExtractedItem> {
        let line = line.trim();
        let verdict = classify_line(line, self.vocabulary);
        if !verdict.is_item() {
            if !line.is_empty() {
                tracing::trace!(line, ?verdict, "line skipped");
            }
            return None;
        }

        let Some(candidate) = parse_candidate(line) else {
            tracing::debug!(line, "no usable name after cleanup");
            return None;
        };
        if !is_grocery(&candidate.name, self.vocabulary) {
            tracing::debug!(line, name = %candidate.name, "not a grocery item");
            return None;
        }

        Some(ExtractedItem::new(title_case(&candidate.name), candidate.quantity))
    }
}
