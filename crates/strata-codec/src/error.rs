//! Error types for the codec crate.

use std::path::PathBuf;

use strata_core::StrataError;
use thiserror::Error;

/// Errors that can occur while reading or writing image files.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Reading or writing a file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not a well-formed file of the expected format.
    #[error("malformed image data: {0}")]
    Malformed(String),

    /// The file extension does not name a supported format.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The raster backend failed to decode or encode.
    #[error("raster codec error: {0}")]
    Raster(String),

    /// The decoded data does not form a valid image.
    #[error(transparent)]
    Image(#[from] StrataError),
}

impl From<image::ImageError> for CodecError {
    fn from(err: image::ImageError) -> Self {
        Self::Raster(err.to_string())
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
