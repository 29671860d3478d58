//! Crop session WASM bindings.
//!
//! The UI layer forwards gesture recognizer callbacks to a `JsCropSession`
//! and draws whatever snapshot comes back. Snapshots and configuration
//! cross the boundary as plain objects with camelCase keys.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsCropSession(source, view.clientWidth, view.clientHeight, {
//!   policy: { shape: { kind: 'square' }, sizing: { kind: 'shorterSideMinusMargin', margin: 40 } },
//! });
//!
//! pinch.onChange = (e) => draw(session.on_magnify(e.scale));
//! pinch.onEnd = () => animate(session.on_magnify_end());
//! pan.onChange = (e) => draw(session.on_drag(e.dx, e.dy));
//! pan.onEnd = () => animate(session.on_drag_end());
//!
//! const result = session.commit();
//! const jpeg = result.encode_jpeg(90);
//! ```

use closetcrop_core::{CropConfig, CropResult, CropSession, Point, Rect, SessionPhase, Size};
use wasm_bindgen::prelude::*;

use crate::error::{to_js_error, to_js_value};
use crate::types::{JsDecodedImage, JsSourceImage};

/// An interactive crop of one source image.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Start a session. `config` may be `undefined` or a partial
    /// `CropConfig` object; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Throws if the config is malformed or the source has no area.
    #[wasm_bindgen(constructor)]
    pub fn new(
        source: &JsSourceImage,
        viewport_width: f64,
        viewport_height: f64,
        config: JsValue,
    ) -> Result<JsCropSession, JsValue> {
        let config: CropConfig = if config.is_undefined() || config.is_null() {
            CropConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
        };
        Self::start(source, Size::new(viewport_width, viewport_height), config)
            .map_err(to_js_error)
    }

    /// Current phase: "idle", "framing", "interacting", "settled",
    /// "committed" or "cancelled".
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        phase_name(self.inner.phase()).to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.state().scale
    }

    #[wasm_bindgen(getter)]
    pub fn offset_x(&self) -> f64 {
        self.inner.state().offset.x
    }

    #[wasm_bindgen(getter)]
    pub fn offset_y(&self) -> f64 {
        self.inner.state().offset.y
    }

    /// `factor` is the recognizer's cumulative scale since the pinch began.
    pub fn on_magnify(&mut self, factor: f64) -> Result<JsValue, JsValue> {
        to_js_value(&self.inner.on_magnify(factor))
    }

    pub fn on_magnify_end(&mut self) -> Result<JsValue, JsValue> {
        to_js_value(&self.inner.on_magnify_end())
    }

    /// `dx`/`dy` are the recognizer's cumulative translation since the drag
    /// began.
    pub fn on_drag(&mut self, dx: f64, dy: f64) -> Result<JsValue, JsValue> {
        to_js_value(&self.inner.on_drag(Point::new(dx, dy)))
    }

    pub fn on_drag_end(&mut self) -> Result<JsValue, JsValue> {
        to_js_value(&self.inner.on_drag_end())
    }

    pub fn on_viewport_resize(&mut self, width: f64, height: f64) -> Result<JsValue, JsValue> {
        to_js_value(&self.inner.on_viewport_resize(Size::new(width, height)))
    }

    /// Frame a previously stored crop rectangle (upright source pixels).
    pub fn restore(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<JsValue, JsValue> {
        to_js_value(&self.inner.restore(&Rect::new(x, y, width, height)))
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.inner.snapshot())
    }

    /// Dimming rectangles and thirds grid, or `undefined` while idle.
    pub fn overlay(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.inner.overlay())
    }

    /// Settle, map and render the crop.
    ///
    /// # Errors
    ///
    /// Throws if the session is closed, the layout is degenerate or the
    /// source has no decodable pixels. A failed commit leaves the session
    /// open.
    pub fn commit(&mut self) -> Result<JsCropResult, JsValue> {
        let result = self.inner.commit().map_err(to_js_error)?;
        Ok(JsCropResult::new(result, self.inner.config().jpeg_quality))
    }

    /// Discard the session.
    pub fn cancel(&mut self) {
        self.inner.cancel();
    }
}

impl JsCropSession {
    fn start(
        source: &JsSourceImage,
        viewport: Size,
        config: CropConfig,
    ) -> Result<Self, closetcrop_core::CropError> {
        Ok(Self {
            inner: CropSession::begin(source.shared(), &viewport, config)?,
        })
    }

    #[cfg(test)]
    fn inner_mut(&mut self) -> &mut CropSession {
        &mut self.inner
    }

    #[cfg(test)]
    fn current(&self) -> closetcrop_core::InteractionSnapshot {
        self.inner.snapshot()
    }
}

fn phase_name(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Idle => "idle",
        SessionPhase::Framing => "framing",
        SessionPhase::Interacting => "interacting",
        SessionPhase::Settled => "settled",
        SessionPhase::Committed => "committed",
        SessionPhase::Cancelled => "cancelled",
    }
}

/// A committed crop.
#[wasm_bindgen]
pub struct JsCropResult {
    inner: CropResult,
    jpeg_quality: u8,
}

#[wasm_bindgen]
impl JsCropResult {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.image.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.image.height
    }

    /// True when the whole-image fallback replaced the crop.
    #[wasm_bindgen(getter)]
    pub fn degraded(&self) -> bool {
        self.inner.degraded
    }

    /// `[x, y, width, height]` of the exact crop in upright source pixels.
    pub fn source_rect(&self) -> Vec<f64> {
        let r = self.inner.source_rect;
        vec![r.x, r.y, r.width, r.height]
    }

    /// `[x, y, width, height]` of the pixels actually extracted.
    pub fn pixel_rect(&self) -> Vec<u32> {
        let r = self.inner.pixel_rect;
        vec![r.x, r.y, r.width, r.height]
    }

    /// The output bitmap (a copy).
    pub fn image(&self) -> JsDecodedImage {
        JsDecodedImage::from_decoded(self.inner.image.clone())
    }

    /// Encode the output as JPEG. Without `quality` the session's
    /// configured quality is used.
    pub fn encode_jpeg(&self, quality: Option<u8>) -> Result<Vec<u8>, JsValue> {
        self.inner
            .encode_jpeg(quality.unwrap_or(self.jpeg_quality))
            .map_err(to_js_error)
    }
}

impl JsCropResult {
    fn new(inner: CropResult, jpeg_quality: u8) -> Self {
        Self {
            inner,
            jpeg_quality,
        }
    }
}
