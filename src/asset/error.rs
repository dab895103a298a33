//! Asset decode errors.

use std::path::PathBuf;

/// Errors that can occur while decoding an item.
///
/// None of these are fatal to a review session: the item is treated as a
/// cache miss and presented with a placeholder.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Failed to open image {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image has no pixels: {path}")]
    EmptyImage { path: PathBuf },
}

impl DecodeError {
    /// Path of the item that failed to decode.
    pub fn path(&self) -> &PathBuf {
        match self {
            DecodeError::Open { path, .. } | DecodeError::EmptyImage { path } => path,
        }
    }
}
