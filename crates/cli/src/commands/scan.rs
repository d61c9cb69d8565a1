//! Scan command: run the pipeline over receipt images (or recognized text).

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;
use tracing::{error, info};

use larder_core::{LarderConfig, OcrSettings, ReceiptResult};
use larder_ocr::{OcrBackend, PipelineError, ReceiptPipeline};

#[derive(Args)]
pub struct ScanArgs {
    /// Receipt images (or text files with --text)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Inputs are already-recognized text, skip OCR
    #[arg(long)]
    text: bool,

    /// Print pantry records instead of the raw extraction result
    #[arg(long)]
    pantry: bool,

    /// Purchase date for pantry records (default: today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    purchase_date: Option<NaiveDate>,
}

pub async fn run(args: ScanArgs, config: &LarderConfig) -> anyhow::Result<()> {
    let vocabulary = config.load_vocabulary()?;
    let pipeline = ReceiptPipeline::new(recognizer(&config.ocr), &vocabulary, config.ocr.clone());

    let mut failed = 0usize;
    for input in &args.inputs {
        match scan_one(&pipeline, input, args.text).await {
            Ok(result) => {
                info!(
                    input = %input.display(),
                    store = ?result.store_name(),
                    items = result.items().len(),
                    "receipt scanned"
                );
                println!("{}", render(&result, &args)?);
            }
            Err(e) => {
                error!(input = %input.display(), error = %e, "receipt scan failed");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} receipt(s) could not be processed", args.inputs.len());
    }
    Ok(())
}

async fn scan_one<R: OcrBackend>(
    pipeline: &ReceiptPipeline<'_, R>,
    input: &Path,
    text_mode: bool,
) -> Result<ReceiptResult, PipelineError> {
    if text_mode {
        let text = tokio::fs::read_to_string(input).await?;
        pipeline.extract_text(&text)
    } else {
        pipeline.process_file(input).await
    }
}

fn render(result: &ReceiptResult, args: &ScanArgs) -> serde_json::Result<String> {
    if args.pantry {
        serde_json::to_string_pretty(&result.pantry_records(args.purchase_date))
    } else {
        serde_json::to_string_pretty(result)
    }
}

#[cfg(feature = "tesseract")]
fn recognizer(settings: &OcrSettings) -> Box<dyn OcrBackend> {
    Box::new(larder_ocr::TesseractRecognizer::from_settings(settings))
}

#[cfg(not(feature = "tesseract"))]
fn recognizer(_settings: &OcrSettings) -> Box<dyn OcrBackend> {
    tracing::warn!("built without the `tesseract` feature; images will yield empty text");
    Box::new(larder_ocr::UnavailableRecognizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_ocr::MockRecognizer;

    fn args(pantry: bool, purchase_date: Option<NaiveDate>) -> ScanArgs {
        ScanArgs { inputs: vec![], text: true, pantry, purchase_date }
    }

    #[tokio::test]
    async fn text_mode_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.txt");
        std::fs::write(&path, "ALDI\nBANANAS 1.29 F\nMILK 3.50\nMILK 2.00\n").unwrap();

        let pipeline = ReceiptPipeline::with_defaults(MockRecognizer::new(""));
        let result = scan_one(&pipeline, &path, true).await.unwrap();
        assert_eq!(result.items().len(), 2);
        assert_eq!(result.items()[1].quantity, 2.0);
    }

    #[tokio::test]
    async fn missing_input_is_error() {
        let pipeline = ReceiptPipeline::with_defaults(MockRecognizer::new(""));
        let missing = PathBuf::from("/no/such/receipt.txt");
        assert!(scan_one(&pipeline, &missing, true).await.is_err());
    }

    #[test]
    fn render_pantry_records() {
        let pipeline = ReceiptPipeline::with_defaults(MockRecognizer::new(""));
        let result = pipeline.extract_text("KROGER\nEGGS 2.19").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&render(&result, &args(true, Some(date))).unwrap()).unwrap();
        assert_eq!(json[0]["name"], "Eggs");
        assert_eq!(json[0]["store_name"], "Kroger");
        assert_eq!(json[0]["purchase_date"], "2024-01-15");
    }

    #[test]
    fn render_raw_result() {
        let result = ReceiptResult::empty("");
        let json: serde_json::Value =
            serde_json::from_str(&render(&result, &args(false, None)).unwrap()).unwrap();
        assert_eq!(json["extracted_items"], serde_json::json!([]));
        assert!(json["store_name"].is_null());
    }
}
