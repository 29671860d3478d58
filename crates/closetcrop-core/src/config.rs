//! Session configuration.
//!
//! `CropConfig` is plain serde data so UI layers can pass it as a JS object
//! (camelCase keys, every field optional).

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;
use crate::frame::CropFramePolicy;
use crate::geometry::Size;

/// Default output edge length for item photos.
pub const DEFAULT_OUTPUT_EDGE: u32 = 1080;

/// Default JPEG quality for the storage handoff.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Size of the rendered output bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OutputSize {
    /// Fixed pixel dimensions.
    Fixed { width: u32, height: u32 },
    /// The crop frame's on-screen size times a pixel density.
    CropFrame { density: f64 },
}

impl Default for OutputSize {
    fn default() -> Self {
        OutputSize::Fixed {
            width: DEFAULT_OUTPUT_EDGE,
            height: DEFAULT_OUTPUT_EDGE,
        }
    }
}

impl OutputSize {
    /// Pixel dimensions for a crop frame of `frame` points.
    ///
    /// Returns `None` if either dimension would be zero.
    pub fn resolve(&self, frame: Size) -> Option<(u32, u32)> {
        let (width, height) = match *self {
            OutputSize::Fixed { width, height } => (width, height),
            OutputSize::CropFrame { density } => {
                if !(density.is_finite() && density > 0.0) || frame.is_degenerate() {
                    return None;
                }
                (
                    (frame.width * density).round() as u32,
                    (frame.height * density).round() as u32,
                )
            }
        };
        (width > 0 && height > 0).then_some((width, height))
    }
}

/// Configuration for one crop session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropConfig {
    pub policy: CropFramePolicy,
    pub output: OutputSize,
    pub filter: FilterType,
    /// Clamp to the coverage scale as soon as the frame is known. When
    /// false the session starts at scale 1.0 and is clamped on the first
    /// gesture end (or at commit).
    pub eager_initial_clamp: bool,
    /// Zoom ceiling as a multiple of the coverage scale. `None` is unbounded.
    pub max_zoom: Option<f64>,
    /// Render the whole source instead of failing on an empty crop
    /// rectangle. The result is flagged as degraded.
    pub fallback_to_whole_image: bool,
    pub jpeg_quality: u8,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            policy: CropFramePolicy::default(),
            output: OutputSize::default(),
            filter: FilterType::Lanczos3,
            eager_initial_clamp: true,
            max_zoom: None,
            fallback_to_whole_image: false,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl CropConfig {
    pub fn with_policy(mut self, policy: CropFramePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_output(mut self, output: OutputSize) -> Self {
        self.output = output;
        self
    }

    pub fn with_eager_initial_clamp(mut self, eager: bool) -> Self {
        self.eager_initial_clamp = eager;
        self
    }
}
