//! Collaborator capabilities around a crop session.
//!
//! Where the photo comes from (camera, library, file picker) and where the
//! result goes are the host's business. The engine only sees these traits.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{decode_source, SourceImage};
use crate::encode::EncodeError;
use crate::error::CropError;
use crate::render::CropResult;

/// Outcome of asking the host for a photo.
#[derive(Debug, Clone, PartialEq)]
pub enum Captured {
    Image(SourceImage),
    /// The user dismissed the picker.
    Cancelled,
}

/// Something that can hand over a photo to crop.
pub trait ImageSource {
    fn capture(&mut self) -> Result<Captured, CropError>;
}

/// Image source backed by encoded file bytes.
///
/// An empty source (no bytes were picked) reports `Captured::Cancelled`.
#[derive(Debug, Clone, Default)]
pub struct BytesImageSource {
    bytes: Option<Vec<u8>>,
}

impl BytesImageSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes: Some(bytes) }
    }

    pub fn cancelled() -> Self {
        Self { bytes: None }
    }
}

impl ImageSource for BytesImageSource {
    /// Decode the held bytes. The bytes are consumed; a second capture
    /// reports `Cancelled`.
    fn capture(&mut self) -> Result<Captured, CropError> {
        match self.bytes.take() {
            Some(bytes) => Ok(Captured::Image(decode_source(&bytes)?)),
            None => Ok(Captured::Cancelled),
        }
    }
}

/// Identifier handed back by an [`ImageStore`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(pub String);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to encode crop result: {0}")]
    Encode(#[from] EncodeError),

    #[error("Storage rejected the image: {0}")]
    Rejected(String),
}

/// Persistence for committed crops.
pub trait ImageStore {
    fn store(&mut self, result: &CropResult) -> Result<ImageId, StoreError>;
}
