//! Pixel operations used by the renderer.
//!
//! # Transform Order
//!
//! At commit time the renderer applies, in order:
//! 1. Orientation normalization (stored order -> upright)
//! 2. Crop to the snapped source-pixel rectangle
//! 3. Resample into the output canvas
//!
//! # Coordinate System
//!
//! - Crop rectangles are in upright source pixels
//! - Origin is top-left corner

mod crop;
mod orientation;
mod resize;

pub use crop::{crop_pixels, PixelRect, SnappedRect};
pub use orientation::normalize_orientation;
pub use resize::{fit_into_canvas, resize};
