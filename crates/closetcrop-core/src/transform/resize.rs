//! Resampling into output canvases.
//!
//! Uses the `image` crate's resize algorithms. All functions return new
//! `DecodedImage` instances without modifying the input.

use crate::decode::{DecodedImage, FilterType};
use crate::error::CropError;

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `CropError::DegenerateGeometry` for a zero target dimension and
/// `CropError::NoDecodableImage` if the source buffer does not match its
/// dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, CropError> {
    if width == 0 || height == 0 {
        return Err(CropError::DegenerateGeometry);
    }

    let rgb_image = image.to_rgb_image().ok_or(CropError::NoDecodableImage)?;

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Draw `image` undistorted and centered on a black `width x height` canvas.
///
/// The image is scaled (up or down) so that it touches the canvas on one
/// axis. Used by the whole-image fallback of the renderer.
pub fn fit_into_canvas(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, CropError> {
    if width == 0 || height == 0 {
        return Err(CropError::DegenerateGeometry);
    }
    if !image.is_decodable() {
        return Err(CropError::NoDecodableImage);
    }

    let (fit_w, fit_h) = calculate_fit_dimensions(image.width, image.height, width, height);
    let fitted = resize(image, fit_w, fit_h, filter)?;
    let fitted = fitted.to_rgb_image().ok_or(CropError::NoDecodableImage)?;

    let mut canvas = image::RgbImage::new(width, height);
    let left = (width - fit_w) / 2;
    let top = (height - fit_h) / 2;
    image::imageops::replace(&mut canvas, &fitted, left as i64, top as i64);

    Ok(DecodedImage::from_rgb_image(canvas))
}

/// Calculate dimensions to fit within a box while preserving aspect ratio.
fn calculate_fit_dimensions(width: u32, height: u32, box_w: u32, box_h: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let scale = (box_w as f64 / width as f64).min(box_h as f64 / height as f64);
    let new_width = ((width as f64 * scale).round() as u32).clamp(1, box_w);
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, box_h);
    (new_width, new_height)
}
