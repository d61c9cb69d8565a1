use std::collections::HashMap;

use larder_core::ExtractedItem;

/// Collapse items sharing the exact same name, summing their quantities.
///
/// Output keeps the order in which each name was first seen. Names are
/// compared as-is; callers title-case before merging so that case variants of
/// the same OCR text land on one entry.
pub fn merge<I>(items: I) -> Vec<ExtractedItem>
where
    I: IntoIterator<Item = ExtractedItem>,
{
    let mut merged: Vec<ExtractedItem> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        match index.get(&item.name) {
            Some(&pos) => merged[pos].quantity += item.quantity,
            None => {
                index.insert(item.name.clone(), merged.len());
                merged.push(item);
            }
        }
    }
    merged
}
