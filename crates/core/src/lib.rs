pub mod config;
pub mod item;
pub mod store;
pub mod vocabulary;

pub use config::{ConfigError, LarderConfig, OcrSettings};
pub use item::{ExtractedItem, PantryItemRecord, ReceiptResult};
pub use store::StoreName;
pub use vocabulary::Vocabulary;
