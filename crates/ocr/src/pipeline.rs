use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use thiserror::Error;

use larder_core::{OcrSettings, ReceiptResult, Vocabulary};

use crate::extract::Extractor;
use crate::preprocess;
use crate::recognizer::{recognize_or_empty, OcrBackend};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Something inside extraction broke. Distinct from a receipt that simply
    /// had no recognizable items.
    #[error("Receipt processing failed: {0}")]
    ProcessingFailed(String),
}

/// Orchestrates: preprocess → OCR → store id → per-line extraction → merge.
///
/// Unreadable images and OCR failures degrade to empty text and an empty
/// result; only an internal fault produces [`PipelineError::ProcessingFailed`].
pub struct ReceiptPipeline<'v, R: OcrBackend> {
    recognizer: R,
    vocabulary: &'v Vocabulary,
    settings: OcrSettings,
}

impl<R: OcrBackend> ReceiptPipeline<'static, R> {
    /// Pipeline using the builtin keyword tables and default OCR settings.
    pub fn with_defaults(recognizer: R) -> Self {
        Self::new(recognizer, Vocabulary::builtin(), OcrSettings::default())
    }
}

impl<'v, R: OcrBackend> ReceiptPipeline<'v, R> {
    pub fn new(recognizer: R, vocabulary: &'v Vocabulary, settings: OcrSettings) -> Self {
        Self { recognizer, vocabulary, settings }
    }

    /// Process raw image bytes (camera capture or upload).
    pub fn extract(&self, image_bytes: &[u8]) -> Result<ReceiptResult, PipelineError> {
        guarded(|| {
            let text = self.recognize(image_bytes);
            Extractor::new(self.vocabulary).extract(&text)
        })
    }

    /// Run extraction on text that was already recognized elsewhere.
    pub fn extract_text(&self, text: &str) -> Result<ReceiptResult, PipelineError> {
        guarded(|| Extractor::new(self.vocabulary).extract(text))
    }

    /// Process an image file on disk.
    pub async fn process_file(&self, path: &Path) -> Result<ReceiptResult, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "processing receipt image");
        self.extract(&bytes)
    }

    fn recognize(&self, image_bytes: &[u8]) -> String {
        match preprocess::prepare_for_ocr(image_bytes, self.settings.max_dimension) {
            Ok(png) => recognize_or_empty(&self.recognizer, &png),
            Err(e) => {
                tracing::warn!(error = %e, "receipt image unreadable, continuing with empty text");
                String::new()
            }
        }
    }
}

fn guarded<F>(f: F) -> Result<ReceiptResult, PipelineError>
where
    F: FnOnce() -> ReceiptResult,
{
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        tracing::error!(%message, "receipt extraction panicked");
        PipelineError::ProcessingFailed(message)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown internal error".to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::{MockRecognizer, OcrError, UnavailableRecognizer};
    use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
    use larder_core::{ExtractedItem, StoreName};
    use std::io::Cursor;

    struct PanickingRecognizer;

    impl OcrBackend for PanickingRecognizer {
        fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
            panic!("recognizer blew up")
        }
    }

    fn tiny_png() -> Vec<u8> {
        let img: GrayImage = ImageBuffer::from_fn(4, 4, |_, _| Luma([200u8]));
        let mut buf = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn extract_runs_ocr_and_parses_items() {
        let pipeline = ReceiptPipeline::with_defaults(MockRecognizer::new(
            "Walmart Supercenter\nBANANAS 1.29 F\n2 X ORGANIC MILK 4.99\nTOTAL 7.27",
        ));
        let result = pipeline.extract(&tiny_png()).unwrap();
        assert_eq!(result.store_name(), Some(StoreName::Walmart));
        assert_eq!(
            result.items(),
            [ExtractedItem::new("Bananas", 1.0), ExtractedItem::new("Organic Milk", 2.0)]
        );
    }

    #[test]
    fn ocr_failure_is_an_empty_result() {
        let pipeline = ReceiptPipeline::with_defaults(UnavailableRecognizer);
        let result = pipeline.extract(&tiny_png()).unwrap();
        assert_eq!(result, ReceiptResult::empty(""));
    }

    #[test]
    fn undecodable_image_is_an_empty_result() {
        let pipeline = ReceiptPipeline::with_defaults(MockRecognizer::new("MILK 3.50"));
        let result = pipeline.extract(b"not an image").unwrap();
        assert!(result.is_empty());
        assert_eq!(result.raw_text(), "");
    }

    #[test]
    fn internal_fault_is_processing_failed() {
        let pipeline = ReceiptPipeline::with_defaults(PanickingRecognizer);
        let err = pipeline.extract(&tiny_png()).unwrap_err();
        match err {
            PipelineError::ProcessingFailed(msg) => assert!(msg.contains("blew up")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn custom_vocabulary_is_used() {
        let vocab = Vocabulary::new(["tofu"], ["total"]).unwrap();
        let pipeline = ReceiptPipeline::new(
            MockRecognizer::new(""),
            &vocab,
            OcrSettings::default(),
        );
        let result = pipeline.extract_text("SILKEN TOFU 2.49\nMILK 3.50").unwrap();
        assert_eq!(result.items(), [ExtractedItem::new("Silken Tofu", 1.0)]);
    }

    #[tokio::test]
    async fn process_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.png");
        std::fs::write(&path, tiny_png()).unwrap();

        let pipeline = ReceiptPipeline::with_defaults(MockRecognizer::new("KROGER\nEGGS 2.19"));
        let result = pipeline.process_file(&path).await.unwrap();
        assert_eq!(result.store_name(), Some(StoreName::Kroger));
        assert_eq!(result.items(), [ExtractedItem::new("Eggs", 1.0)]);
    }

    #[tokio::test]
    async fn process_file_missing_is_io_error() {
        let pipeline = ReceiptPipeline::with_defaults(MockRecognizer::new(""));
        let err = pipeline.process_file(Path::new("/no/such/receipt.jpg")).await.unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }

    #[test]
    fn result_serializes_for_callers() {
        let pipeline = ReceiptPipeline::with_defaults(MockRecognizer::new(""));
        let result = pipeline.extract_text("ALDI\nBANANAS 1.29 F").unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["store_name"], "ALDI");
        assert_eq!(json["extracted_items"][0]["quantity"], 1.0);
    }
}
