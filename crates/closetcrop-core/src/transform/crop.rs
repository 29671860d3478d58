//! Pixel-rectangle cropping.
//!
//! The pixel mapper produces a rectangle in fractional source pixels. This
//! module snaps it to whole pixels, clamps it to the image bounds and copies
//! the covered rows out of the upright buffer.

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;
use crate::geometry::Rect;

/// Slack, in pixels, that rounding alone may introduce on an edge.
const ROUNDING_SLACK: f64 = 0.5;

/// An integer rectangle in upright source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Result of snapping a fractional rectangle onto the pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnappedRect {
    pub rect: PixelRect,
    /// True when clamping to the image bounds changed more than rounding
    /// would have.
    pub clamped: bool,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole `width x height` image.
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Snap `rect` to whole pixels inside a `width x height` image.
    ///
    /// Edges are rounded independently so adjacent crops tile without gaps.
    /// A span that rounds to nothing but still overlaps the image keeps the
    /// one pixel under its centre. Returns `None` if `rect` misses the image.
    pub fn snap(rect: &Rect, width: u32, height: u32) -> Option<SnappedRect> {
        if rect.is_degenerate() || width == 0 || height == 0 {
            return None;
        }

        let (x0, x1, clamped_x) = snap_axis(rect.x, rect.max_x(), width)?;
        let (y0, y1, clamped_y) = snap_axis(rect.y, rect.max_y(), height)?;

        Some(SnappedRect {
            rect: PixelRect::new(x0, y0, x1 - x0, y1 - y0),
            clamped: clamped_x || clamped_y,
        })
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.x as f64,
            self.y as f64,
            self.width as f64,
            self.height as f64,
        )
    }

    pub fn is_full(&self, width: u32, height: u32) -> bool {
        *self == Self::full(width, height)
    }
}

fn snap_axis(start: f64, end: f64, limit: u32) -> Option<(u32, u32, bool)> {
    let limit_f = limit as f64;
    if end <= 0.0 || start >= limit_f {
        return None;
    }

    let clamped = start < -ROUNDING_SLACK || end > limit_f + ROUNDING_SLACK;
    let lo = start.round().clamp(0.0, limit_f) as u32;
    let hi = end.round().clamp(0.0, limit_f) as u32;
    if hi > lo {
        return Some((lo, hi, clamped));
    }

    // Sub-pixel span at deep zoom
    let centre = ((start + end) / 2.0).floor().clamp(0.0, limit_f - 1.0) as u32;
    Some((centre, centre + 1, clamped))
}

/// Copy the pixels covered by `rect` out of `image`.
///
/// `rect` must lie inside the image, as produced by [`PixelRect::snap`].
pub fn crop_pixels(image: &DecodedImage, rect: PixelRect) -> DecodedImage {
    debug_assert!(rect.x + rect.width <= image.width);
    debug_assert!(rect.y + rect.height <= image.height);

    // Fast path: full crop returns a clone
    if rect.is_full(image.width, image.height) {
        return image.clone();
    }

    let src_stride = image.width as usize * 3;
    let row_len = rect.width as usize * 3;
    let mut output = Vec::with_capacity(row_len * rect.height as usize);

    // Copy pixel data row by row
    for y in rect.y..rect.y + rect.height {
        let start = y as usize * src_stride + rect.x as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    DecodedImage {
        width: rect.width,
        height: rect.height,
        pixels: output,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
