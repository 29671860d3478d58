//! Geometry model for the crop engine.
//!
//! # Coordinate System
//!
//! - Screen space is the viewport, origin top-left, in device-independent points
//! - The displayed image is centered in the viewport and moved by `offset`
//! - `scale` is relative to the aspect-fit ("contain") size, so `scale = 1.0`
//!   shows the whole image inside the viewport
//! - Source space is upright source pixels, origin top-left

mod calculator;
mod types;

pub use calculator::{clamp_offset, clamp_state, fit, is_settled, max_offset, min_coverage_scale};
pub use types::{Point, Rect, Size};
