//! Orientation normalization.
//!
//! Gestures operate on the displayed, upright image while pixels may be
//! stored rotated or mirrored. Before any crop arithmetic the renderer turns
//! the stored buffer upright so that source-pixel rectangles line up with
//! what the user saw.

use image::DynamicImage;

use crate::decode::{DecodedImage, Orientation, SourceImage};
use crate::error::CropError;

/// Return the source pixels in upright order.
///
/// # Errors
///
/// Returns `CropError::NoDecodableImage` if the pixel buffer is empty or does
/// not match the stored dimensions.
pub fn normalize_orientation(source: &SourceImage) -> Result<DecodedImage, CropError> {
    if !source.image.is_decodable() {
        return Err(CropError::NoDecodableImage);
    }
    if source.orientation == Orientation::Normal {
        return Ok(source.image.clone());
    }

    let rgb = source
        .image
        .to_rgb_image()
        .ok_or(CropError::NoDecodableImage)?;
    let upright = apply_orientation(DynamicImage::ImageRgb8(rgb), source.orientation);
    Ok(DecodedImage::from_rgb_image(upright.into_rgb8()))
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 3] = [255, 0, 0];
    const GREEN: [u8; 3] = [0, 255, 0];
    const BLUE: [u8; 3] = [0, 0, 255];
    const YELLOW: [u8; 3] = [255, 255, 0];

    /// 2x1 image: red on the left, green on the right.
    fn strip(orientation: Orientation) -> SourceImage {
        let pixels = [RED, GREEN].concat();
        SourceImage::new(DecodedImage::new(2, 1, pixels), orientation)
    }

    /// 2x2 image: red, green on top; blue, yellow below.
    fn quad(orientation: Orientation) -> SourceImage {
        let pixels = [RED, GREEN, BLUE, YELLOW].concat();
        SourceImage::new(DecodedImage::new(2, 2, pixels), orientation)
    }

    fn pixel(image: &DecodedImage, x: u32, y: u32) -> [u8; 3] {
        let idx = ((y * image.width + x) * 3) as usize;
        [image.pixels[idx], image.pixels[idx + 1], image.pixels[idx + 2]]
    }

    #[test]
    fn test_normal_is_passthrough() {
        let source = quad(Orientation::Normal);
        let upright = normalize_orientation(&source).unwrap();
        assert_eq!(upright, source.image);
    }

    #[test]
    fn test_rotate90_swaps_dimensions() {
        let upright = normalize_orientation(&strip(Orientation::Rotate90CW)).unwrap();
        assert_eq!((upright.width, upright.height), (1, 2));
        assert_eq!(pixel(&upright, 0, 0), RED);
        assert_eq!(pixel(&upright, 0, 1), GREEN);
    }

    #[test]
    fn test_rotate270() {
        let upright = normalize_orientation(&strip(Orientation::Rotate270CW)).unwrap();
        assert_eq!((upright.width, upright.height), (1, 2));
        assert_eq!(pixel(&upright, 0, 0), GREEN);
        assert_eq!(pixel(&upright, 0, 1), RED);
    }

    #[test]
    fn test_rotate180() {
        let upright = normalize_orientation(&strip(Orientation::Rotate180)).unwrap();
        assert_eq!(pixel(&upright, 0, 0), GREEN);
        assert_eq!(pixel(&upright, 1, 0), RED);
    }

    #[test]
    fn test_flip_horizontal() {
        let upright = normalize_orientation(&strip(Orientation::FlipHorizontal)).unwrap();
        assert_eq!(pixel(&upright, 0, 0), GREEN);
        assert_eq!(pixel(&upright, 1, 0), RED);
    }

    #[test]
    fn test_flip_vertical() {
        let upright = normalize_orientation(&quad(Orientation::FlipVertical)).unwrap();
        assert_eq!(pixel(&upright, 0, 0), BLUE);
        assert_eq!(pixel(&upright, 1, 1), GREEN);
    }

    #[test]
    fn test_transpose_mirrors_main_diagonal() {
        let upright = normalize_orientation(&quad(Orientation::Transpose)).unwrap();
        assert_eq!(pixel(&upright, 0, 0), RED);
        assert_eq!(pixel(&upright, 1, 0), BLUE);
        assert_eq!(pixel(&upright, 0, 1), GREEN);
        assert_eq!(pixel(&upright, 1, 1), YELLOW);
    }

    #[test]
    fn test_transverse_mirrors_anti_diagonal() {
        let upright = normalize_orientation(&quad(Orientation::Transverse)).unwrap();
        assert_eq!(pixel(&upright, 0, 0), YELLOW);
        assert_eq!(pixel(&upright, 1, 1), RED);
    }

    #[test]
    fn test_oriented_dimensions_match_output() {
        for value in 1..=8u32 {
            let source = SourceImage::new(
                DecodedImage::new(3, 2, vec![0u8; 3 * 2 * 3]),
                Orientation::from(value),
            );
            let upright = normalize_orientation(&source).unwrap();
            assert_eq!((upright.width, upright.height), source.oriented_dimensions());
        }
    }

    #[test]
    fn test_undecodable_source() {
        let source = SourceImage::upright(DecodedImage {
            width: 4,
            height: 4,
            pixels: Vec::new(),
        });
        assert!(matches!(
            normalize_orientation(&source),
            Err(CropError::NoDecodableImage)
        ));
    }
}
