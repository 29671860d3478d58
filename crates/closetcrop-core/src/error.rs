//! Error type for crop sessions.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::geometry::Rect;

/// Errors surfaced by a crop session.
///
/// Geometry problems during gestures are never reported here; they are
/// corrected by re-clamping. Only the terminal operations and session
/// construction return these.
#[derive(Debug, Error)]
pub enum CropError {
    /// The viewport, source or crop frame has zero area, or the mapped
    /// source rectangle is empty. Retry once layout has settled.
    #[error("Degenerate crop geometry: viewport, source or crop rectangle has no area")]
    DegenerateGeometry,

    /// The source bitmap has no usable pixel buffer.
    #[error("Couldn't process this photo: source image has no decodable pixels")]
    NoDecodableImage,

    /// The mapped rectangle falls outside the source bounds.
    #[error("Crop rectangle {rect:?} lies outside source bounds {bounds:?}")]
    ClipOutOfBounds { rect: Rect, bounds: Rect },

    /// The session was already committed or cancelled.
    #[error("Crop session is already closed")]
    SessionClosed,

    /// Decoding the source failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
