//! Crop frame resolution.
//!
//! The crop frame is the fixed "keep" rectangle drawn over the viewport. It is
//! always centered and only changes when the viewport is resized.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// Shape of the crop frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CropShape {
    /// Equal width and height.
    #[default]
    Square,
    /// Fixed width/height ratio; the longer side gets the base length.
    FixedAspect { ratio: f64 },
}

/// How the base side length is derived from the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FrameSizing {
    /// `min(width, height) * fraction`.
    FractionOfShorterSide { fraction: f64 },
    /// `min(width, height) - margin`, floored at zero.
    ShorterSideMinusMargin { margin: f64 },
}

impl Default for FrameSizing {
    fn default() -> Self {
        FrameSizing::FractionOfShorterSide { fraction: 0.7 }
    }
}

/// Crop frame configuration, static for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropFramePolicy {
    pub shape: CropShape,
    pub sizing: FrameSizing,
}

impl CropFramePolicy {
    /// Square frame at `fraction` of the shorter viewport side.
    pub fn square_fraction(fraction: f64) -> Self {
        Self {
            shape: CropShape::Square,
            sizing: FrameSizing::FractionOfShorterSide { fraction },
        }
    }

    /// Square frame of the shorter viewport side minus `margin`.
    pub fn square_margin(margin: f64) -> Self {
        Self {
            shape: CropShape::Square,
            sizing: FrameSizing::ShorterSideMinusMargin { margin },
        }
    }

    /// Frame size for `viewport`. May be degenerate.
    pub fn frame_size(&self, viewport: Size) -> Size {
        let shorter = viewport.shorter_side();
        let base = match self.sizing {
            FrameSizing::FractionOfShorterSide { fraction } => shorter * fraction,
            FrameSizing::ShorterSideMinusMargin { margin } => (shorter - margin).max(0.0),
        };

        match self.shape {
            CropShape::Square => Size::new(base, base),
            CropShape::FixedAspect { ratio } if ratio >= 1.0 => Size::new(base, base / ratio),
            CropShape::FixedAspect { ratio } => Size::new(base * ratio, base),
        }
    }
}

/// Resolve the centered crop frame for `viewport`.
///
/// Returns `None` when the viewport or the resulting frame is degenerate,
/// e.g. before the first layout pass or when the margin eats the whole side.
pub fn resolve_crop_frame(viewport: Size, policy: &CropFramePolicy) -> Option<Rect> {
    if viewport.is_degenerate() {
        return None;
    }
    let size = policy.frame_size(viewport);
    if size.is_degenerate() {
        return None;
    }
    let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
    Some(Rect::from_center_size(center, size))
}
