//! Source image decoding.
//!
//! This module provides:
//! - Decoding encoded photos (JPEG, PNG) into RGB pixel buffers
//! - Reading the EXIF orientation tag without applying it
//! - The [`SourceImage`] type handed to a crop session
//!
//! # Examples
//!
//! ```ignore
//! use closetcrop_core::decode::decode_source;
//!
//! let bytes = std::fs::read("shirt.jpg").unwrap();
//! let source = decode_source(&bytes).unwrap();
//! println!("Upright size: {:?}", source.oriented_dimensions());
//! ```

mod source;
mod types;

pub use source::{decode_source, read_orientation};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation, SourceImage};
