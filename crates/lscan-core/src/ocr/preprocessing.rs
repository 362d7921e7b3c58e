//! Image preparation before upload to an OCR engine.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use tracing::debug;

use crate::error::OcrError;

/// `adjust_contrast` argument that scales distance from mid-grey by ~1.5.
const CONTRAST: f32 = 22.5;

/// 3x3 sharpening kernel.
const SHARPEN: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

/// Prepare a photographed label for OCR and re-encode it as PNG.
///
/// Images wider than `max_width` are downscaled keeping their aspect ratio,
/// then converted to grayscale, contrast-boosted and sharpened.
pub fn prepare_image(bytes: &[u8], max_width: u32) -> Result<Vec<u8>, OcrError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| OcrError::InvalidImage(e.to_string()))?;

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(OcrError::InvalidImage(format!("{}x{}", width, height)));
    }

    let image = downscale(image, max_width);
    let prepared = image.grayscale().adjust_contrast(CONTRAST).filter3x3(&SHARPEN);

    debug!(
        "Prepared image {}x{} -> {}x{}",
        width,
        height,
        prepared.width(),
        prepared.height()
    );

    let mut out = Cursor::new(Vec::new());
    prepared
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| OcrError::Preprocessing(e.to_string()))?;

    Ok(out.into_inner())
}

fn downscale(image: DynamicImage, max_width: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    if max_width == 0 || width <= max_width {
        return image;
    }

    let new_height = ((height as f64 * max_width as f64 / width as f64).round() as u32).max(1);
    image.resize_exact(max_width, new_height, FilterType::Lanczos3)
}
