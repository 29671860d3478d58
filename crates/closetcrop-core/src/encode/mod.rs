//! Output encoding for the storage handoff.
//!
//! # Examples
//!
//! ```ignore
//! use closetcrop_core::encode::encode_image;
//!
//! let jpeg_bytes = encode_image(&result.image, 90).unwrap();
//! store.put(jpeg_bytes);
//! ```

mod jpeg;

pub use jpeg::{encode_image, encode_jpeg, EncodeError};
