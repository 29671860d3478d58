//! WASM-compatible wrapper types for image data.
//!
//! These wrap the core image types and handle the conversion between Rust
//! and JavaScript data representations.

use std::sync::Arc;

use closetcrop_core::decode::{DecodedImage, Orientation, SourceImage};
use wasm_bindgen::prelude::*;

/// An RGB bitmap for JavaScript.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` copies it into a
/// `Uint8Array`, so keep the image on the WASM side until it is needed.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from dimensions and RGB pixel data (3 bytes per pixel,
    /// row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// A photo ready to be cropped: stored pixels plus their EXIF orientation.
///
/// Sessions share the pixels, so starting several sessions from one source
/// does not copy the buffer.
#[wasm_bindgen]
pub struct JsSourceImage {
    inner: Arc<SourceImage>,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Wrap an already decoded bitmap. `orientation` is the EXIF value 1-8;
    /// anything else is treated as upright.
    #[wasm_bindgen(constructor)]
    pub fn new(image: &JsDecodedImage, orientation: u32) -> JsSourceImage {
        Self::from_source(SourceImage::new(
            image.to_decoded(),
            Orientation::from(orientation),
        ))
    }

    /// Upright (displayed) width
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.oriented_dimensions().0
    }

    /// Upright (displayed) height
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.oriented_dimensions().1
    }

    /// EXIF orientation value (1-8)
    #[wasm_bindgen(getter)]
    pub fn orientation(&self) -> u8 {
        self.inner.orientation as u8
    }

    /// The stored pixels, not orientation-corrected.
    pub fn stored_image(&self) -> JsDecodedImage {
        JsDecodedImage::from_decoded(self.inner.image.clone())
    }
}

impl JsSourceImage {
    pub(crate) fn from_source(source: SourceImage) -> Self {
        Self {
            inner: Arc::new(source),
        }
    }

    pub(crate) fn shared(&self) -> Arc<SourceImage> {
        Arc::clone(&self.inner)
    }
}
