//! File format selection by extension.

use std::fmt;
use std::path::Path;

use crate::Codec;
use crate::error::{CodecError, Result};
use crate::ppm::PpmCodec;
use crate::raster::RasterCodec;

/// The file formats Strata can read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Plain-text PPM (`.ppm`).
    Ppm,
    /// PNG (`.png`).
    Png,
    /// JPEG (`.jpg`, `.jpeg`).
    Jpeg,
}

impl ImageFormat {
    /// Look up a format by file extension, ignoring case.
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "ppm" => Ok(Self::Ppm),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(CodecError::UnsupportedFormat(extension.to_string())),
        }
    }

    /// Look up a format by the extension of `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| CodecError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(extension)
    }

    /// The codec that reads and writes this format.
    pub fn codec(self) -> Box<dyn Codec> {
        match self {
            Self::Ppm => Box::new(PpmCodec),
            Self::Png => Box::new(RasterCodec::png()),
            Self::Jpeg => Box::new(RasterCodec::jpeg()),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ppm => "ppm",
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        })
    }
}
