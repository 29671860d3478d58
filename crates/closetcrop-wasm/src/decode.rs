//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_source`] - Decode a photo into a crop-ready source image
//! - [`read_orientation`] - Read only the EXIF orientation tag
//!
//! # Example
//!
//! ```typescript
//! import { decode_source } from '@closetcrop/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const source = decode_source(bytes);
//! console.log(`Upright ${source.width}x${source.height}, EXIF ${source.orientation}`);
//! ```

use closetcrop_core::decode;
use wasm_bindgen::prelude::*;

use crate::error::to_js_error;
use crate::types::JsSourceImage;

/// Decode a JPEG or PNG photo.
///
/// Pixels stay in stored order and the EXIF orientation travels with them;
/// the crop session corrects orientation when it renders.
///
/// # Errors
///
/// Throws if the bytes are empty, not a supported format, or corrupted.
#[wasm_bindgen]
pub fn decode_source(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    decode::decode_source(bytes)
        .map(JsSourceImage::from_source)
        .map_err(to_js_error)
}

/// EXIF orientation value (1-8) of an encoded photo, 1 when absent.
#[wasm_bindgen]
pub fn read_orientation(bytes: &[u8]) -> u8 {
    decode::read_orientation(bytes) as u8
}
