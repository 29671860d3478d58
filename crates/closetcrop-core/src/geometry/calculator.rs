//! Fit, coverage and offset-bound calculations.
//!
//! Everything here is a pure function of the source size, viewport size and
//! crop-frame size. None of these functions are meaningful for degenerate
//! sizes; callers check [`Size::is_degenerate`] first.

use super::{Point, Size};

/// Aspect-fit ("contain") `source` inside `viewport`.
///
/// This is the image's on-screen size at scale 1.0. A source that is wider
/// than the viewport (by aspect) is width-constrained, otherwise it is
/// height-constrained.
///
/// # Example
///
/// ```ignore
/// let rendered = fit(Size::new(3000.0, 2000.0), Size::new(390.0, 600.0));
/// assert_eq!(rendered, Size::new(390.0, 260.0));
/// ```
pub fn fit(source: Size, viewport: Size) -> Size {
    let source_aspect = source.aspect();
    if source_aspect > viewport.aspect() {
        Size::new(viewport.width, viewport.width / source_aspect)
    } else {
        Size::new(viewport.height * source_aspect, viewport.height)
    }
}

/// Smallest scale at which `rendered` fully covers `frame` on both axes.
///
/// This is the clamp floor: the user may zoom further in, but a settled
/// state never sits below it.
pub fn min_coverage_scale(rendered: Size, frame: Size) -> f64 {
    (frame.width / rendered.width).max(frame.height / rendered.height)
}

/// Largest absolute offset per axis that keeps `frame` inside the scaled
/// image.
///
/// An axis where the scaled image is not larger than the frame has a bound
/// of zero, which pins the offset to the center.
pub fn max_offset(rendered: Size, scale: f64, frame: Size) -> Point {
    Point::new(
        ((rendered.width * scale - frame.width) / 2.0).max(0.0),
        ((rendered.height * scale - frame.height) / 2.0).max(0.0),
    )
}

/// Bound `raw` to `[-max, max]` per axis for the given scale.
///
/// A value beyond the bound is replaced by the bound itself, not by a value
/// just inside it.
pub fn clamp_offset(rendered: Size, scale: f64, frame: Size, raw: Point) -> Point {
    let bound = max_offset(rendered, scale, frame);
    Point::new(clamp_axis(raw.x, bound.x), clamp_axis(raw.y, bound.y))
}

fn clamp_axis(value: f64, bound: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(-bound, bound)
}

/// Clamp a full `(scale, offset)` pair into the settled region.
///
/// The scale is raised to the coverage floor and, when `max_zoom` is set,
/// lowered to `floor * max_zoom`. The offset is then clamped against the
/// resulting scale, so a scale correction can also move the offset.
pub fn clamp_state(
    rendered: Size,
    frame: Size,
    scale: f64,
    offset: Point,
    max_zoom: Option<f64>,
) -> (f64, Point) {
    let floor = min_coverage_scale(rendered, frame);
    let mut clamped = if scale.is_finite() { scale.max(floor) } else { floor };

    if let Some(zoom) = max_zoom.filter(|z| z.is_finite() && *z >= 1.0) {
        clamped = clamped.min(floor * zoom);
    }

    let offset = clamp_offset(rendered, clamped, frame, offset);
    (clamped, offset)
}

/// Whether `(scale, offset)` satisfies the coverage and bounds invariants.
///
/// `tolerance` absorbs floating-point noise from callers that recompute the
/// geometry (e.g. after a viewport resize). It is relative for the scale
/// floor and absolute, in points, for the offset bounds.
pub fn is_settled(rendered: Size, frame: Size, scale: f64, offset: Point, tolerance: f64) -> bool {
    let floor = min_coverage_scale(rendered, frame);
    if !(scale.is_finite() && scale >= floor * (1.0 - tolerance)) {
        return false;
    }
    let bound = max_offset(rendered, scale, frame);
    offset.x.abs() <= bound.x + tolerance && offset.y.abs() <= bound.y + tolerance
}
