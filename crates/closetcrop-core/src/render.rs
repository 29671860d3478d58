//! Final render: source-pixel rectangle to output bitmap.
//!
//! A [`RenderJob`] owns everything the render needs, so a session can hand
//! it to a worker thread and keep the UI thread free on large sources. The
//! render itself is a pure function of the job.

use std::sync::Arc;

use crate::decode::{DecodedImage, FilterType, SourceImage};
use crate::encode::{encode_image, EncodeError};
use crate::error::CropError;
use crate::geometry::Rect;
use crate::interaction::Transform;
use crate::transform::{crop_pixels, fit_into_canvas, normalize_orientation, resize, PixelRect};

/// Snapshot of a settled session, ready to render.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub source: Arc<SourceImage>,
    /// Crop rectangle in upright source pixels.
    pub source_rect: Rect,
    /// Output bitmap dimensions.
    pub output: (u32, u32),
    pub filter: FilterType,
    pub fallback_to_whole_image: bool,
    /// The committed state the rectangle was mapped from.
    pub transform: Transform,
}

impl RenderJob {
    pub fn run(self) -> Result<CropResult, CropError> {
        render(&self)
    }
}

/// Output of a committed crop session.
#[derive(Debug, Clone, PartialEq)]
pub struct CropResult {
    pub image: DecodedImage,
    /// Exact mapped rectangle in upright source pixels.
    pub source_rect: Rect,
    /// Whole-pixel rectangle actually extracted.
    pub pixel_rect: PixelRect,
    pub transform: Transform,
    /// True when the whole-image fallback replaced the crop.
    pub degraded: bool,
}

impl CropResult {
    /// Encode the output bitmap for the storage handoff.
    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>, EncodeError> {
        encode_image(&self.image, quality)
    }
}

/// Render `job` into its output bitmap.
///
/// # Errors
///
/// - `CropError::NoDecodableImage` if the source has no usable pixels
/// - `CropError::DegenerateGeometry` if the rectangle covers no pixels (and
///   the fallback is disabled) or the output size is zero
pub fn render(job: &RenderJob) -> Result<CropResult, CropError> {
    let upright = normalize_orientation(&job.source)?;
    let (out_w, out_h) = job.output;

    let Some(snapped) = PixelRect::snap(&job.source_rect, upright.width, upright.height) else {
        if !job.fallback_to_whole_image {
            return Err(CropError::DegenerateGeometry);
        }
        log::warn!(
            "Crop rectangle {:?} covers no pixels of {}x{} source, rendering whole image",
            job.source_rect,
            upright.width,
            upright.height
        );
        let image = fit_into_canvas(&upright, out_w, out_h, job.filter)?;
        return Ok(CropResult {
            image,
            source_rect: job.source_rect,
            pixel_rect: PixelRect::full(upright.width, upright.height),
            transform: job.transform,
            degraded: true,
        });
    };

    if snapped.clamped {
        log::warn!(
            "Crop rectangle {:?} exceeded {}x{} source, clamped to {:?}",
            job.source_rect,
            upright.width,
            upright.height,
            snapped.rect
        );
    }

    let cropped = crop_pixels(&upright, snapped.rect);
    let image = resize(&cropped, out_w, out_h, job.filter)?;

    Ok(CropResult {
        image,
        source_rect: job.source_rect,
        pixel_rect: snapped.rect,
        transform: job.transform,
        degraded: false,
    })
}
