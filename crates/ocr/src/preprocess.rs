use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use std::io::Cursor;

use crate::recognizer::OcrError;

/// Decode a photographed receipt (JPEG / PNG / WEBP / …) and return grayscale,
/// contrast-stretched PNG bytes no larger than `max_dimension` on either side.
pub fn prepare_for_ocr(data: &[u8], max_dimension: u32) -> Result<Vec<u8>, OcrError> {
    let img = image::load_from_memory(data).map_err(|e| OcrError::ImageDecode(e.to_string()))?;
    let gray = stretch_contrast(downscale(img, max_dimension).to_luma8());
    encode_png(DynamicImage::ImageLuma8(gray))
}

fn downscale(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    if max_dimension > 0 && (img.width() > max_dimension || img.height() > max_dimension) {
        img.resize(max_dimension, max_dimension, image::imageops::FilterType::Lanczos3)
    } else {
        img
    }
}

/// Map the darkest pixel to 0 and the brightest to 255.
fn stretch_contrast(gray: GrayImage) -> GrayImage {
    let (lo, hi) = gray
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
    if hi <= lo {
        return gray;
    }

    let range = u32::from(hi - lo);
    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        let v = u32::from(gray.get_pixel(x, y)[0] - lo) * 255 / range;
        Luma([v as u8])
    })
}

fn encode_png(img: DynamicImage) -> Result<Vec<u8>, OcrError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| OcrError::ImageEncode(e.to_string()))?;
    Ok(buf)
}
