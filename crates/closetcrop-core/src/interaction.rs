//! Gesture-to-state reducer.
//!
//! Two independent gesture streams feed the state: magnification (pinch)
//! and translation (drag). Each stream reports values relative to the start
//! of its gesture, and the reducer applies them to the last committed
//! baseline, never to the live value. This keeps consecutive gestures free of
//! jumps.
//!
//! Live updates are not clamped, so the image can be pulled past its bounds
//! while a finger is down. When the last active gesture ends the state is
//! clamped back into the settled region and a [`Correction`] describes the
//! snap-back for the presenter to animate.

use serde::{Deserialize, Serialize};

use crate::geometry::{clamp_state, is_settled, Point, Size};

/// Slack used when checking invariants on recomputed geometry: a relative
/// factor on the coverage scale and an absolute distance in points on the
/// offset bounds.
pub const SETTLE_TOLERANCE: f64 = 1e-9;

/// Geometry the reducer clamps against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampBounds {
    /// Image size at scale 1.0.
    pub rendered: Size,
    /// Crop frame size.
    pub frame: Size,
    /// Optional zoom ceiling as a multiple of the coverage scale.
    pub max_zoom: Option<f64>,
}

/// A `(scale, offset)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub scale: f64,
    pub offset: Point,
}

/// Snap-back produced when settling moved the state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    pub from: Transform,
    pub to: Transform,
}

/// Mutable pan/zoom state of one crop session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionState {
    /// Live scale relative to the aspect-fit size.
    pub scale: f64,
    /// Live offset of the image center from the viewport center.
    pub offset: Point,
    /// Scale at the end of the last magnification (or settle).
    pub committed_scale: f64,
    /// Offset at the end of the last drag (or settle).
    pub committed_offset: Point,
    magnifying: bool,
    dragging: bool,
}

impl InteractionState {
    pub fn new(scale: f64, offset: Point) -> Self {
        Self {
            scale,
            offset,
            committed_scale: scale,
            committed_offset: offset,
            magnifying: false,
            dragging: false,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform {
            scale: self.scale,
            offset: self.offset,
        }
    }

    pub fn is_magnifying(&self) -> bool {
        self.magnifying
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// True while any gesture is in flight.
    pub fn is_gesturing(&self) -> bool {
        self.magnifying || self.dragging
    }

    /// Apply a magnification report.
    ///
    /// `factor` is cumulative since the gesture started (1.0 at start).
    /// Non-finite or non-positive factors are ignored.
    pub fn magnify(&mut self, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            log::debug!("Ignoring magnification factor {}", factor);
            return;
        }
        self.magnifying = true;
        self.scale = self.committed_scale * factor;
    }

    /// End the magnification gesture.
    ///
    /// Settles when no drag is in flight.
    pub fn magnify_end(&mut self, bounds: &ClampBounds) -> Option<Correction> {
        self.committed_scale = self.scale;
        self.magnifying = false;
        self.settle_if_idle(bounds)
    }

    /// Apply a drag report. `translation` is cumulative since the drag
    /// started.
    pub fn drag(&mut self, translation: Point) {
        if !translation.is_finite() {
            log::debug!("Ignoring drag translation {:?}", translation);
            return;
        }
        self.dragging = true;
        self.offset = self.committed_offset + translation;
    }

    /// End the drag gesture.
    ///
    /// Settles when no magnification is in flight.
    pub fn drag_end(&mut self, bounds: &ClampBounds) -> Option<Correction> {
        self.committed_offset = self.offset;
        self.dragging = false;
        self.settle_if_idle(bounds)
    }

    /// Drop any in-flight gestures, keeping their current values.
    pub fn interrupt(&mut self) {
        self.committed_scale = self.scale;
        self.committed_offset = self.offset;
        self.magnifying = false;
        self.dragging = false;
    }

    /// Clamp into the settled region and rebase the committed copies.
    pub fn settle(&mut self, bounds: &ClampBounds) -> Option<Correction> {
        let from = self.transform();
        let (scale, offset) = clamp_state(
            bounds.rendered,
            bounds.frame,
            self.scale,
            self.offset,
            bounds.max_zoom,
        );
        self.scale = scale;
        self.offset = offset;
        self.committed_scale = scale;
        self.committed_offset = offset;

        let to = self.transform();
        if from == to {
            return None;
        }
        log::debug!(
            "Settled crop state: scale {:.4} -> {:.4}, offset ({:.2}, {:.2}) -> ({:.2}, {:.2})",
            from.scale,
            to.scale,
            from.offset.x,
            from.offset.y,
            to.offset.x,
            to.offset.y
        );
        Some(Correction { from, to })
    }

    /// Whether the live state satisfies the coverage and bounds invariants.
    pub fn is_settled(&self, bounds: &ClampBounds) -> bool {
        !self.is_gesturing()
            && is_settled(
                bounds.rendered,
                bounds.frame,
                self.scale,
                self.offset,
                SETTLE_TOLERANCE,
            )
    }

    fn settle_if_idle(&mut self, bounds: &ClampBounds) -> Option<Correction> {
        if self.is_gesturing() {
            None
        } else {
            self.settle(bounds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{max_offset, min_coverage_scale};

    fn scenario_bounds() -> ClampBounds {
        ClampBounds {
            rendered: Size::new(390.0, 260.0),
            frame: Size::new(350.0, 350.0),
            max_zoom: None,
        }
    }

    fn settled_state(bounds: &ClampBounds) -> InteractionState {
        InteractionState::new(min_coverage_scale(bounds.rendered, bounds.frame), Point::ZERO)
    }

    #[test]
    fn test_magnify_is_relative_to_committed() {
        let bounds = scenario_bounds();
        let mut state = InteractionState::new(2.0, Point::ZERO);

        state.magnify(1.5);
        assert_eq!(state.scale, 3.0);
        state.magnify(2.0);
        assert_eq!(state.scale, 4.0);
        assert!(state.is_magnifying());

        state.magnify_end(&bounds);
        assert_eq!(state.committed_scale, 4.0);

        // Next gesture starts from the committed scale
        state.magnify(0.5);
        assert_eq!(state.scale, 2.0);
    }

    #[test]
    fn test_magnify_ignores_bad_factors() {
        let mut state = InteractionState::new(2.0, Point::ZERO);
        state.magnify(0.0);
        state.magnify(-1.0);
        state.magnify(f64::NAN);
        assert_eq!(state.scale, 2.0);
        assert!(!state.is_magnifying());
    }

    #[test]
    fn test_magnify_not_clamped_live() {
        let bounds = scenario_bounds();
        let mut state = settled_state(&bounds);
        state.magnify(0.2);
        assert!(state.scale < min_coverage_scale(bounds.rendered, bounds.frame));
    }

    #[test]
    fn test_magnify_end_restores_coverage() {
        let bounds = scenario_bounds();
        let floor = min_coverage_scale(bounds.rendered, bounds.frame);
        let mut state = settled_state(&bounds);

        state.magnify(0.5);
        let correction = state.magnify_end(&bounds).expect("should snap back");

        assert_eq!(state.scale, floor);
        assert_eq!(state.committed_scale, floor);
        assert_eq!(correction.to.scale, floor);
        assert!((correction.from.scale - floor * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_drag_is_relative_to_committed() {
        let mut state = InteractionState::new(3.0, Point::new(10.0, 0.0));
        state.drag(Point::new(5.0, 5.0));
        assert_eq!(state.offset, Point::new(15.0, 5.0));
        state.drag(Point::new(-5.0, 2.0));
        assert_eq!(state.offset, Point::new(5.0, 2.0));
        assert!(state.is_dragging());
    }

    #[test]
    fn test_drag_end_clamps_to_exact_bound() {
        let bounds = scenario_bounds();
        let mut state = settled_state(&bounds);
        let bound = max_offset(bounds.rendered, state.scale, bounds.frame);

        state.drag(Point::new(bound.x + 200.0, 0.0));
        state.drag_end(&bounds);

        assert_eq!(state.offset.x, bound.x);
        assert_eq!(state.committed_offset.x, bound.x);
        assert!(state.is_settled(&bounds));
    }

    #[test]
    fn test_drag_within_bounds_no_correction() {
        let bounds = scenario_bounds();
        let mut state = settled_state(&bounds);
        state.drag(Point::new(20.0, 0.0));
        assert_eq!(state.drag_end(&bounds), None);
        assert_eq!(state.offset, Point::new(20.0, 0.0));
    }

    #[test]
    fn test_concurrent_gestures_clamp_once() {
        let bounds = scenario_bounds();
        let floor = min_coverage_scale(bounds.rendered, bounds.frame);
        let mut state = settled_state(&bounds);

        state.magnify(2.0);
        state.drag(Point::new(1000.0, -1000.0));

        // Drag ends first: nothing is clamped while the pinch is active
        assert_eq!(state.drag_end(&bounds), None);
        assert_eq!(state.offset, Point::new(1000.0, -1000.0));
        assert!(!state.is_settled(&bounds));

        let correction = state.magnify_end(&bounds);
        assert!(correction.is_some());
        assert!((state.scale - floor * 2.0).abs() < 1e-12);
        let bound = max_offset(bounds.rendered, state.scale, bounds.frame);
        assert_eq!(state.offset, Point::new(bound.x, -bound.y));
        assert!(state.is_settled(&bounds));
    }

    #[test]
    fn test_interrupt_keeps_values() {
        let mut state = InteractionState::new(2.0, Point::ZERO);
        state.magnify(1.5);
        state.drag(Point::new(3.0, 4.0));
        state.interrupt();

        assert!(!state.is_gesturing());
        assert_eq!(state.committed_scale, 3.0);
        assert_eq!(state.committed_offset, Point::new(3.0, 4.0));
    }

    #[test]
    fn test_max_zoom_ceiling() {
        let mut bounds = scenario_bounds();
        bounds.max_zoom = Some(3.0);
        let floor = min_coverage_scale(bounds.rendered, bounds.frame);
        let mut state = settled_state(&bounds);

        state.magnify(10.0);
        state.magnify_end(&bounds);
        assert!((state.scale - floor * 3.0).abs() < 1e-12);
    }
}
