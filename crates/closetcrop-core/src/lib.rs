//! Closetcrop Core - Interactive crop engine
//!
//! This crate turns pinch and drag gestures over a photo into an exact
//! source-pixel crop for wardrobe item images: geometry, gesture reduction,
//! crop frame layout, screen-to-source mapping, overlay geometry and the
//! final render.
//!
//! # Example
//!
//! ```ignore
//! use closetcrop_core::{decode_source, CropConfig, CropSession, Point, Size};
//!
//! let source = decode_source(&bytes)?;
//! let mut session = CropSession::begin(source, &Size::new(390.0, 600.0), CropConfig::default())?;
//! session.on_drag(Point::new(40.0, 0.0));
//! session.on_drag_end();
//! let result = session.commit()?;
//! ```

pub mod capture;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod interaction;
pub mod mapper;
pub mod overlay;
pub mod render;
pub mod session;
pub mod transform;

pub use capture::{BytesImageSource, Captured, ImageId, ImageSource, ImageStore, StoreError};
pub use config::{CropConfig, OutputSize};
pub use decode::{decode_source, DecodeError, DecodedImage, FilterType, Orientation, SourceImage};
pub use encode::EncodeError;
pub use error::CropError;
pub use frame::{resolve_crop_frame, CropFramePolicy, CropShape, FrameSizing};
pub use geometry::{Point, Rect, Size};
pub use interaction::{Correction, InteractionState, Transform};
pub use mapper::ViewGeometry;
pub use overlay::{LineSegment, OverlayLayout};
pub use render::{render, CropResult, RenderJob};
pub use session::{CropSession, InteractionSnapshot, SessionPhase, ViewportProvider};
pub use transform::PixelRect;
