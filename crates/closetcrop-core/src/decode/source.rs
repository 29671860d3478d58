//! Source decoding with EXIF orientation tag extraction.
//!
//! Unlike a viewer pipeline, the crop engine keeps pixels in stored order and
//! carries the orientation tag alongside them. The renderer normalizes
//! orientation at commit time, right before pixel arithmetic.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;

use super::{DecodeError, DecodedImage, Orientation, SourceImage};

/// Decode an encoded photo (JPEG or PNG) into a [`SourceImage`].
///
/// The EXIF orientation is read and stored on the result, but not applied.
///
/// # Errors
///
/// Returns `DecodeError::EmptyInput` for empty input and
/// `DecodeError::CorruptedFile` if the bytes cannot be decoded.
pub fn decode_source(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let orientation = read_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let image = DecodedImage::from_rgb_image(img.into_rgb8());
    log::debug!(
        "Decoded source {}x{} with orientation {:?}",
        image.width,
        image.height,
        orientation
    );

    Ok(SourceImage::new(image, orientation))
}

/// Extract the EXIF orientation from encoded bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}
