//! Image encoding WASM bindings for the storage handoff.
//!
//! # Example
//!
//! ```typescript
//! const result = session.commit();
//! const jpeg = result.encode_jpeg(90);
//! await store.put(new Blob([jpeg], { type: 'image/jpeg' }));
//! ```

use closetcrop_core::encode;
use wasm_bindgen::prelude::*;

use crate::error::to_js_error;
use crate::types::JsDecodedImage;

/// Encode RGB pixel data to JPEG bytes.
///
/// `quality` is clamped to 1-100.
///
/// # Errors
///
/// Throws if:
/// - The pixel data length doesn't match width * height * 3
/// - Width or height is zero
/// - Encoding fails internally
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(to_js_error)
}

/// Encode a JsDecodedImage to JPEG bytes.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_image(&image.to_decoded(), quality).map_err(to_js_error)
}
