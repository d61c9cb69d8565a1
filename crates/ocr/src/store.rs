use larder_core::StoreName;

/// Find the retailer named anywhere in the receipt text.
///
/// Markers are tested in [`StoreName::PRIORITY`] order, so when a receipt
/// mentions several retailers (an address in a Target plaza printed on a
/// Costco receipt, say) the earlier entry in that list wins regardless of
/// where each name appears in the text.
pub fn identify(text: &str) -> Option<StoreName> {
    let lower = text.to_lowercase();
    StoreName::PRIORITY
        .into_iter()
        .find(|store| lower.contains(store.marker()))
}
