pub mod classify;
pub mod extract;
pub mod grocery;
pub mod merge;
pub mod parse;
mod patterns;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod store;

pub use classify::{classify_line, is_item_line, LineVerdict};
pub use extract::Extractor;
pub use grocery::is_grocery;
pub use merge::merge;
pub use parse::{parse_candidate, Candidate};
pub use pipeline::{PipelineError, ReceiptPipeline};
pub use preprocess::prepare_for_ocr;
pub use recognizer::{recognize_or_empty, MockRecognizer, OcrBackend, OcrError, UnavailableRecognizer};
pub use store::identify as identify_store;

#[cfg(feature = "tesseract")]
pub use recognizer::tesseract_backend::TesseractRecognizer;
