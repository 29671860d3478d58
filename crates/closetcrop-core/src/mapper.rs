//! Screen-to-source pixel mapping.
//!
//! This is the only path from what the user framed on screen to the pixels
//! that get extracted:
//!
//! ```text
//! image_on_screen = rect of size rendered * scale,
//!                   centered at viewport_center + offset
//! relative        = (frame.origin - image_on_screen.origin) / image_on_screen.size
//!                   (size: frame.size / image_on_screen.size)
//! source_rect     = relative * source_size
//! ```
//!
//! `source_size` is the upright size of the source. For a settled state the
//! relative rectangle lies inside `[0, 1] x [0, 1]`.

use crate::error::CropError;
use crate::geometry::{Point, Rect, Size};

/// Relative tolerance for the out-of-bounds check.
const BOUNDS_TOLERANCE: f64 = 1e-6;

/// Everything the mapper needs about the on-screen view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewGeometry {
    pub viewport: Size,
    /// Aspect-fit size of the source at scale 1.0.
    pub rendered: Size,
    pub frame: Rect,
    /// Upright source size in pixels.
    pub source: Size,
}

impl ViewGeometry {
    fn viewport_center(&self) -> Point {
        Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    /// Where the image is drawn on screen for `(scale, offset)`.
    pub fn image_rect_on_screen(&self, scale: f64, offset: Point) -> Rect {
        Rect::from_center_size(self.viewport_center() + offset, self.rendered.scaled(scale))
    }

    /// The crop frame in normalized image coordinates.
    pub fn relative_rect(&self, scale: f64, offset: Point) -> Rect {
        let image = self.image_rect_on_screen(scale, offset);
        Rect::new(
            (self.frame.x - image.x) / image.width,
            (self.frame.y - image.y) / image.height,
            self.frame.width / image.width,
            self.frame.height / image.height,
        )
    }

    /// The crop frame in upright source pixels.
    pub fn map_to_source(&self, scale: f64, offset: Point) -> Rect {
        let relative = self.relative_rect(scale, offset);
        Rect::new(
            relative.x * self.source.width,
            relative.y * self.source.height,
            relative.width * self.source.width,
            relative.height * self.source.height,
        )
    }

    /// Like [`ViewGeometry::map_to_source`], but rejects rectangles that
    /// leave the source bounds.
    ///
    /// A settled state never produces such a rectangle.
    pub fn map_to_source_checked(&self, scale: f64, offset: Point) -> Result<Rect, CropError> {
        let rect = self.map_to_source(scale, offset);
        if rect.is_degenerate() {
            return Err(CropError::DegenerateGeometry);
        }
        let bounds = Rect::new(0.0, 0.0, self.source.width, self.source.height);
        let tolerance = BOUNDS_TOLERANCE * self.source.width.max(self.source.height);
        if !bounds.contains_rect(&rect, tolerance) {
            return Err(CropError::ClipOutOfBounds { rect, bounds });
        }
        Ok(rect)
    }

    /// Inverse mapping: the `(scale, offset)` that frames `source_rect`.
    ///
    /// The scale is derived from the horizontal extent, so `source_rect`
    /// should have the frame's aspect ratio. Returns `None` for degenerate
    /// input.
    pub fn state_for_source_rect(&self, source_rect: &Rect) -> Option<(f64, Point)> {
        if source_rect.is_degenerate() || self.rendered.is_degenerate() || self.source.is_degenerate()
        {
            return None;
        }

        // frame.width / (rendered.width * scale) == source_rect.width / source.width
        let scale = self.frame.width * self.source.width / (source_rect.width * self.rendered.width);
        let image_size = self.rendered.scaled(scale);

        let image_x = self.frame.x - source_rect.x / self.source.width * image_size.width;
        let image_y = self.frame.y - source_rect.y / self.source.height * image_size.height;

        let center = self.viewport_center();
        let offset = Point::new(
            image_x + image_size.width / 2.0 - center.x,
            image_y + image_size.height / 2.0 - center.y,
        );
        Some((scale, offset))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::frame::{resolve_crop_frame, CropFramePolicy};
    use crate::geometry::{fit, max_offset, min_coverage_scale};
    use proptest::prelude::*;

    fn view_strategy() -> impl Strategy<Value = ViewGeometry> {
        (
            (16u32..6000, 16u32..6000),
            (100.0f64..1500.0, 100.0f64..1500.0),
            0.3f64..1.0,
        )
            .prop_map(|((sw, sh), (vw, vh), fraction)| {
                let viewport = Size::new(vw, vh);
                let source = Size::new(sw as f64, sh as f64);
                ViewGeometry {
                    viewport,
                    rendered: fit(source, viewport),
                    frame: resolve_crop_frame(viewport, &CropFramePolicy::square_fraction(fraction))
                        .unwrap(),
                    source,
                }
            })
    }

    fn relative_close(a: f64, b: f64, scale: f64) -> bool {
        (a - b).abs() <= 1e-3 * scale
    }

    proptest! {
        /// Property: any settled state maps inside the source bounds.
        #[test]
        fn prop_settled_state_in_bounds(
            view in view_strategy(),
            zoom in 1.0f64..6.0,
            fx in -1.0f64..=1.0,
            fy in -1.0f64..=1.0,
        ) {
            let scale = min_coverage_scale(view.rendered, view.frame.size()) * zoom;
            let bound = max_offset(view.rendered, scale, view.frame.size());
            let offset = Point::new(bound.x * fx, bound.y * fy);

            prop_assert!(view.map_to_source_checked(scale, offset).is_ok());
        }

        /// Property: synthesizing the state for a mapped rectangle and mapping
        /// it again recovers the rectangle.
        #[test]
        fn prop_round_trip(
            view in view_strategy(),
            zoom in 1.0f64..6.0,
            fx in -1.0f64..=1.0,
            fy in -1.0f64..=1.0,
        ) {
            let scale = min_coverage_scale(view.rendered, view.frame.size()) * zoom;
            let bound = max_offset(view.rendered, scale, view.frame.size());
            let rect = view.map_to_source(scale, Point::new(bound.x * fx, bound.y * fy));

            let (scale2, offset2) = view.state_for_source_rect(&rect).unwrap();
            let again = view.map_to_source(scale2, offset2);

            let size = view.source.width.max(view.source.height);
            prop_assert!(relative_close(again.x, rect.x, size));
            prop_assert!(relative_close(again.y, rect.y, size));
            prop_assert!(relative_close(again.width, rect.width, rect.width));
            prop_assert!(relative_close(again.height, rect.height, rect.height));
        }
    }
}
