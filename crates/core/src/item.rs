use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::store::StoreName;

fn default_quantity() -> f64 {
    1.0
}

/// A grocery item recognized on a receipt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedItem {
    /// Title-cased, whitespace-normalized name. Also the merge key.
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
}

impl ExtractedItem {
    pub fn new(name: impl Into<String>, quantity: f64) -> Self {
        Self { name: name.into(), quantity }
    }
}

/// Everything the extraction pipeline produces for one receipt image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptResult {
    store_name: Option<StoreName>,
    #[serde(rename = "extracted_items")]
    items: Vec<ExtractedItem>,
    raw_text: String,
}

impl ReceiptResult {
    pub fn new(
        store_name: Option<StoreName>,
        items: Vec<ExtractedItem>,
        raw_text: impl Into<String>,
    ) -> Self {
        Self { store_name, items, raw_text: raw_text.into() }
    }

    /// A result with no store and no items, keeping whatever text the OCR produced.
    pub fn empty(raw_text: impl Into<String>) -> Self {
        Self::new(None, Vec::new(), raw_text)
    }

    pub fn store_name(&self) -> Option<StoreName> {
        self.store_name
    }

    pub fn items(&self) -> &[ExtractedItem] {
        &self.items
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert the extracted items into records ready to hand to the pantry store.
    /// `purchase_date` defaults to today (UTC).
    pub fn pantry_records(&self, purchase_date: Option<NaiveDate>) -> Vec<PantryItemRecord> {
        let purchase_date = purchase_date.unwrap_or_else(|| Utc::now().date_naive());
        let store_name = self.store_name.map(|s| s.to_string());
        self.items
            .iter()
            .map(|item| PantryItemRecord {
                name: item.name.clone(),
                quantity: item.quantity,
                unit: None,
                purchase_date: Some(purchase_date),
                expiry_date: None,
                store_name: store_name.clone(),
            })
            .collect()
    }
}

/// The shape a confirmed item takes when handed to persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PantryItemRecord {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    /// e.g. kg, L, pcs
    pub unit: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub store_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_defaults_to_one_when_missing() {
        let item: ExtractedItem = serde_json::from_str(r#"{"name":"Milk"}"#).unwrap();
        assert_eq!(item, ExtractedItem::new("Milk", 1.0));
    }

    #[test]
    fn result_serializes_with_payload_field_names() {
        let result = ReceiptResult::new(
            Some(StoreName::Aldi),
            vec![ExtractedItem::new("Bananas", 1.0)],
            "ALDI\nBANANAS 1.29 F",
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["store_name"], "ALDI");
        assert_eq!(json["extracted_items"][0]["name"], "Bananas");
        assert_eq!(json["raw_text"], "ALDI\nBANANAS 1.29 F");
    }

    #[test]
    fn empty_result_keeps_raw_text() {
        let result = ReceiptResult::empty("");
        assert!(result.is_empty());
        assert_eq!(result.store_name(), None);
        assert_eq!(result.raw_text(), "");
    }

    #[test]
    fn pantry_records_carry_store_and_date() {
        let result = ReceiptResult::new(
            Some(StoreName::Kroger),
            vec![ExtractedItem::new("Milk", 2.0), ExtractedItem::new("Eggs", 1.0)],
            "",
        );
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let records = result.pantry_records(Some(date));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Milk");
        assert_eq!(records[0].quantity, 2.0);
        assert_eq!(records[0].purchase_date, Some(date));
        assert_eq!(records[1].store_name.as_deref(), Some("Kroger"));
        assert!(records.iter().all(|r| r.unit.is_none() && r.expiry_date.is_none()));
    }

    #[test]
    fn pantry_records_default_to_today() {
        let result = ReceiptResult::new(None, vec![ExtractedItem::new("Rice", 1.0)], "");
        let records = result.pantry_records(None);
        assert_eq!(records[0].purchase_date, Some(Utc::now().date_naive()));
        assert_eq!(records[0].store_name, None);
    }
}
