//! Crop session: the state machine driving one crop from framing to commit.
//!
//! ```text
//! Idle -> Framing -> Interacting -> Settled -> Committed
//!                                           \-> Cancelled
//! ```
//!
//! A session stays `Idle` while the viewport (or the frame it yields) has
//! no area. `Framing` means geometry exists but the invariants have not been
//! enforced yet, which only happens with `eager_initial_clamp = false`.
//! Gesture callbacks never fail; problems are corrected by re-clamping.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::CropConfig;
use crate::decode::SourceImage;
use crate::error::CropError;
use crate::frame::resolve_crop_frame;
use crate::geometry::{fit, min_coverage_scale, Point, Rect, Size};
use crate::interaction::{ClampBounds, Correction, InteractionState, Transform};
use crate::mapper::ViewGeometry;
use crate::overlay::{overlay_layout, OverlayLayout};
use crate::render::{CropResult, RenderJob};

/// Anything that can report the current viewport size.
pub trait ViewportProvider {
    fn viewport_size(&self) -> Size;
}

impl ViewportProvider for Size {
    fn viewport_size(&self) -> Size {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    /// No usable viewport yet.
    Idle,
    /// Geometry known, invariants not yet enforced.
    Framing,
    /// At least one gesture in flight.
    Interacting,
    /// Invariants hold.
    Settled,
    Committed,
    Cancelled,
}

impl SessionPhase {
    pub fn is_closed(self) -> bool {
        matches!(self, SessionPhase::Committed | SessionPhase::Cancelled)
    }
}

/// What the presenter needs after every callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionSnapshot {
    pub phase: SessionPhase,
    pub transform: Transform,
    /// Crop frame in viewport coordinates. `None` while idle.
    pub frame: Option<Rect>,
    /// Aspect-fit image size at scale 1.0. `None` while idle.
    pub rendered_size: Option<Size>,
    /// Present when the callback snapped the state back into bounds.
    pub correction: Option<Correction>,
}

/// Geometry derived from the viewport; recomputed on every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    rendered: Size,
    frame: Rect,
}

/// One interactive crop of one source image.
#[derive(Debug, Clone)]
pub struct CropSession {
    source: Arc<SourceImage>,
    source_size: Size,
    config: CropConfig,
    viewport: Size,
    layout: Option<Layout>,
    state: InteractionState,
    phase: SessionPhase,
}

impl CropSession {
    /// Start a session for `source` inside the viewport reported by
    /// `viewport`.
    ///
    /// A degenerate viewport is not an error: the session starts `Idle` and
    /// frames itself on the first usable [`CropSession::on_viewport_resize`].
    ///
    /// # Errors
    ///
    /// Returns `CropError::DegenerateGeometry` if the source has no area.
    pub fn begin(
        source: impl Into<Arc<SourceImage>>,
        viewport: &impl ViewportProvider,
        config: CropConfig,
    ) -> Result<Self, CropError> {
        let source = source.into();
        let source_size = source.oriented_size();
        if source_size.is_degenerate() {
            return Err(CropError::DegenerateGeometry);
        }

        let mut session = Self {
            source,
            source_size,
            config,
            viewport: viewport.viewport_size(),
            layout: None,
            state: InteractionState::new(1.0, Point::ZERO),
            phase: SessionPhase::Idle,
        };
        session.layout = session.compute_layout();
        session.frame_initial();

        log::debug!(
            "Crop session started: source {}x{}, viewport {:?}, phase {:?}",
            source_size.width,
            source_size.height,
            session.viewport,
            session.phase
        );
        Ok(session)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn frame(&self) -> Option<Rect> {
        self.layout.map(|l| l.frame)
    }

    pub fn rendered_size(&self) -> Option<Size> {
        self.layout.map(|l| l.rendered)
    }

    /// Mapping inputs for the current layout.
    pub fn view(&self) -> Option<ViewGeometry> {
        self.layout.map(|layout| ViewGeometry {
            viewport: self.viewport,
            rendered: layout.rendered,
            frame: layout.frame,
            source: self.source_size,
        })
    }

    /// Where the image is currently drawn.
    pub fn image_rect_on_screen(&self) -> Option<Rect> {
        self.view()
            .map(|view| view.image_rect_on_screen(self.state.scale, self.state.offset))
    }

    /// Dimming mask and thirds grid for the current frame.
    pub fn overlay(&self) -> Option<OverlayLayout> {
        self.frame().map(|frame| overlay_layout(self.viewport, frame))
    }

    pub fn snapshot(&self) -> InteractionSnapshot {
        self.snapshot_with(None)
    }

    pub fn on_magnify(&mut self, factor: f64) -> InteractionSnapshot {
        if self.accepts_gestures() {
            self.state.magnify(factor);
            self.after_gesture_update();
        }
        self.snapshot()
    }

    pub fn on_magnify_end(&mut self) -> InteractionSnapshot {
        let Some(bounds) = self.live_bounds() else {
            return self.snapshot();
        };
        let correction = self.state.magnify_end(&bounds);
        self.after_gesture_end();
        self.snapshot_with(correction)
    }

    pub fn on_drag(&mut self, translation: Point) -> InteractionSnapshot {
        if self.accepts_gestures() {
            self.state.drag(translation);
            self.after_gesture_update();
        }
        self.snapshot()
    }

    pub fn on_drag_end(&mut self) -> InteractionSnapshot {
        let Some(bounds) = self.live_bounds() else {
            return self.snapshot();
        };
        let correction = self.state.drag_end(&bounds);
        self.after_gesture_end();
        self.snapshot_with(correction)
    }

    /// Recompute the frame for a new viewport and re-clamp.
    ///
    /// In-flight gestures are finished at their current values. A session
    /// leaving `Idle` frames itself like a freshly started one.
    pub fn on_viewport_resize(&mut self, size: Size) -> InteractionSnapshot {
        if self.phase.is_closed() {
            return self.snapshot();
        }
        self.viewport = size;
        self.state.interrupt();
        self.layout = self.compute_layout();

        if self.phase == SessionPhase::Idle || self.layout.is_none() {
            self.frame_initial();
            return self.snapshot();
        }

        let correction = self.settle();
        self.snapshot_with(correction)
    }

    /// Frame `source_rect` (upright source pixels), e.g. to restore a
    /// previous crop. The result is clamped like any other state.
    pub fn restore(&mut self, source_rect: &Rect) -> InteractionSnapshot {
        if !self.accepts_gestures() {
            return self.snapshot();
        }
        let Some((scale, offset)) = self
            .view()
            .and_then(|view| view.state_for_source_rect(source_rect))
        else {
            log::debug!("Ignoring restore of degenerate rectangle {:?}", source_rect);
            return self.snapshot();
        };
        self.state = InteractionState::new(scale, offset);
        let correction = self.settle();
        self.snapshot_with(correction)
    }

    /// Settle and snapshot everything the render needs, closing the session.
    ///
    /// Use this to render off the UI thread; [`CropSession::commit`] is the
    /// same followed by an inline render.
    ///
    /// # Errors
    ///
    /// - `CropError::SessionClosed` if already committed or cancelled
    /// - `CropError::DegenerateGeometry` if there is no usable layout or the
    ///   output size resolves to zero
    /// - `CropError::ClipOutOfBounds` if the mapped rectangle leaves the
    ///   source
    pub fn prepare_commit(&mut self) -> Result<RenderJob, CropError> {
        let job = self.render_job()?;
        self.set_phase(SessionPhase::Committed);
        Ok(job)
    }

    /// Settle, map and render the crop.
    ///
    /// On error the session stays open, so a commit that failed on geometry
    /// can be retried after layout settles.
    ///
    /// # Errors
    ///
    /// Everything [`CropSession::prepare_commit`] returns, plus
    /// `CropError::NoDecodableImage` when the source has no usable pixels.
    pub fn commit(&mut self) -> Result<CropResult, CropError> {
        let job = self.render_job()?;
        let result = job.run()?;
        self.set_phase(SessionPhase::Committed);

        log::info!(
            "Committed crop: source rect {:?}, output {}x{}{}",
            result.source_rect,
            result.image.width,
            result.image.height,
            if result.degraded { " (degraded)" } else { "" }
        );
        Ok(result)
    }

    /// Discard the session. Nothing is rendered.
    pub fn cancel(&mut self) {
        if !self.phase.is_closed() {
            self.set_phase(SessionPhase::Cancelled);
        }
    }

    fn render_job(&mut self) -> Result<RenderJob, CropError> {
        if self.phase.is_closed() {
            return Err(CropError::SessionClosed);
        }
        let view = self.view().ok_or(CropError::DegenerateGeometry)?;

        self.state.interrupt();
        self.settle();

        let transform = self.state.transform();
        let source_rect = view.map_to_source_checked(transform.scale, transform.offset)?;
        let output = self
            .config
            .output
            .resolve(view.frame.size())
            .ok_or(CropError::DegenerateGeometry)?;

        Ok(RenderJob {
            source: Arc::clone(&self.source),
            source_rect,
            output,
            filter: self.config.filter,
            fallback_to_whole_image: self.config.fallback_to_whole_image,
            transform,
        })
    }

    fn compute_layout(&self) -> Option<Layout> {
        let frame = resolve_crop_frame(self.viewport, &self.config.policy)?;
        let rendered = fit(self.source_size, self.viewport);
        if rendered.is_degenerate() {
            return None;
        }
        Some(Layout { rendered, frame })
    }

    /// Place the state for a freshly available layout.
    fn frame_initial(&mut self) {
        let Some(layout) = self.layout else {
            self.set_phase(SessionPhase::Idle);
            return;
        };
        if self.config.eager_initial_clamp {
            let floor = min_coverage_scale(layout.rendered, layout.frame.size());
            self.state = InteractionState::new(floor, Point::ZERO);
            self.settle();
        } else {
            self.state = InteractionState::new(1.0, Point::ZERO);
            self.set_phase(SessionPhase::Framing);
        }
    }

    fn settle(&mut self) -> Option<Correction> {
        let bounds = self.bounds()?;
        let correction = self.state.settle(&bounds);
        self.set_phase(SessionPhase::Settled);
        correction
    }

    fn bounds(&self) -> Option<ClampBounds> {
        self.layout.map(|layout| ClampBounds {
            rendered: layout.rendered,
            frame: layout.frame.size(),
            max_zoom: self.config.max_zoom,
        })
    }

    /// Bounds for a gesture callback, or `None` when gestures are ignored.
    fn live_bounds(&self) -> Option<ClampBounds> {
        if self.accepts_gestures() {
            self.bounds()
        } else {
            None
        }
    }

    fn accepts_gestures(&self) -> bool {
        !self.phase.is_closed() && self.layout.is_some()
    }

    fn after_gesture_update(&mut self) {
        if self.state.is_gesturing() {
            self.set_phase(SessionPhase::Interacting);
        }
    }

    fn after_gesture_end(&mut self) {
        if !self.state.is_gesturing() {
            // The reducer settled when the last gesture ended
            self.set_phase(SessionPhase::Settled);
        }
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase != phase {
            log::debug!("Crop session phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    fn snapshot_with(&self, correction: Option<Correction>) -> InteractionSnapshot {
        InteractionSnapshot {
            phase: self.phase,
            transform: self.state.transform(),
            frame: self.frame(),
            rendered_size: self.rendered_size(),
            correction,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decode::DecodedImage;
    use crate::frame::CropFramePolicy;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Gesture {
        Magnify(f64),
        MagnifyEnd,
        Drag(f64, f64),
        DragEnd,
    }

    fn gesture_strategy() -> impl Strategy<Value = Gesture> {
        prop_oneof![
            (0.1f64..8.0).prop_map(Gesture::Magnify),
            Just(Gesture::MagnifyEnd),
            (-2000.0f64..2000.0, -2000.0f64..2000.0).prop_map(|(x, y)| Gesture::Drag(x, y)),
            Just(Gesture::DragEnd),
        ]
    }

    fn session(sw: u32, sh: u32, viewport: Size, fraction: f64) -> CropSession {
        let source = SourceImage::upright(DecodedImage {
            width: sw,
            height: sh,
            pixels: Vec::new(),
        });
        let config = CropConfig::default().with_policy(CropFramePolicy::square_fraction(fraction));
        CropSession::begin(source, &viewport, config).unwrap()
    }

    fn settled(session: &CropSession) -> bool {
        match (session.rendered_size(), session.frame()) {
            (Some(rendered), Some(frame)) => session.state().is_settled(&ClampBounds {
                rendered,
                frame: frame.size(),
                max_zoom: None,
            }),
            _ => false,
        }
    }

    fn apply(session: &mut CropSession, gesture: &Gesture) {
        match *gesture {
            Gesture::Magnify(f) => session.on_magnify(f),
            Gesture::MagnifyEnd => session.on_magnify_end(),
            Gesture::Drag(x, y) => session.on_drag(Point::new(x, y)),
            Gesture::DragEnd => session.on_drag_end(),
        };
    }

    proptest! {
        /// Property: once every gesture has ended the coverage and bounds
        /// invariants hold.
        #[test]
        fn prop_settled_after_gestures(
            (sw, sh) in (16u32..6000, 16u32..6000),
            (vw, vh) in (100.0f64..1500.0, 100.0f64..1500.0),
            fraction in 0.3f64..1.0,
            gestures in prop::collection::vec(gesture_strategy(), 0..24),
        ) {
            let mut session = session(sw, sh, Size::new(vw, vh), fraction);
            for gesture in &gestures {
                apply(&mut session, gesture);
            }
            session.on_magnify_end();
            session.on_drag_end();

            prop_assert_eq!(session.phase(), SessionPhase::Settled);
            prop_assert!(settled(&session));
        }

        /// Property: a viewport resize leaves a settled state behind, for
        /// any sequence of sizes.
        #[test]
        fn prop_resize_stability(
            (sw, sh) in (16u32..6000, 16u32..6000),
            sizes in prop::collection::vec((100.0f64..1500.0, 100.0f64..1500.0), 1..8),
            zoom in 1.0f64..4.0,
            (dx, dy) in (-800.0f64..800.0, -800.0f64..800.0),
        ) {
            let mut session = session(sw, sh, Size::new(390.0, 600.0), 0.9);
            session.on_magnify(zoom);
            session.on_drag(Point::new(dx, dy));

            for (w, h) in sizes {
                session.on_viewport_resize(Size::new(w, h));
                prop_assert!(settled(&session));
            }
        }

        /// Property: settling a settled state changes nothing.
        #[test]
        fn prop_settle_is_idempotent(
            (sw, sh) in (16u32..6000, 16u32..6000),
            zoom in 0.2f64..5.0,
            (dx, dy) in (-800.0f64..800.0, -800.0f64..800.0),
        ) {
            let mut session = session(sw, sh, Size::new(390.0, 600.0), 0.8);
            session.on_magnify(zoom);
            session.on_magnify_end();
            session.on_drag(Point::new(dx, dy));
            session.on_drag_end();

            let before = session.state().transform();
            let again = session.on_viewport_resize(Size::new(390.0, 600.0));
            prop_assert!(again.correction.is_none());
            prop_assert_eq!(again.transform, before);
        }

        /// Property: a committed rectangle always lies inside the source.
        #[test]
        fn prop_commit_in_bounds(
            (sw, sh) in (16u32..6000, 16u32..6000),
            gestures in prop::collection::vec(gesture_strategy(), 0..16),
        ) {
            let mut session = session(sw, sh, Size::new(390.0, 600.0), 0.7);
            for gesture in &gestures {
                apply(&mut session, gesture);
            }
            prop_assert!(session.prepare_commit().is_ok());
        }
    }
}
