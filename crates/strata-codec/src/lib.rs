//! Image file codecs for Strata.
//!
//! Three formats are supported: plain-text PPM through [`PpmCodec`], and
//! PNG and JPEG through [`RasterCodec`], which wraps the `image` crate. The
//! [`read_image`] and [`write_image`] helpers pick the codec from a path's
//! extension.
//!
//! ```no_run
//! use strata_codec::{read_image, write_image};
//!
//! let image = read_image("input.ppm")?;
//! write_image("output.png", &image)?;
//! # Ok::<(), strata_codec::CodecError>(())
//! ```

pub mod error;
pub mod format;
pub mod ppm;
pub mod raster;

use std::path::Path;

use strata_core::Image;
use strata_core::logging::targets;
use tracing::debug;

pub use error::{CodecError, Result};
pub use format::ImageFormat;
pub use ppm::PpmCodec;
pub use raster::RasterCodec;

/// Converts between encoded bytes and [`Image`]s.
pub trait Codec {
    /// Decode `bytes` into an image.
    fn decode(&self, bytes: &[u8]) -> Result<Image>;

    /// Encode `image` into bytes.
    fn encode(&self, image: &Image) -> Result<Vec<u8>>;
}

/// Read and decode the image at `path`, choosing the codec by extension.
pub fn read_image(path: impl AsRef<Path>) -> Result<Image> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = format.codec().decode(&bytes)?;
    debug!(
        target: targets::CODEC,
        path = %path.display(),
        %format,
        width = image.width(),
        height = image.height(),
        "image read"
    );
    Ok(image)
}

/// Encode `image` and write it to `path`, choosing the codec by extension.
pub fn write_image(path: impl AsRef<Path>, image: &Image) -> Result<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    let bytes = format.codec().encode(image)?;
    std::fs::write(path, &bytes).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(target: targets::CODEC, path = %path.display(), %format, bytes = bytes.len(), "image written");
    Ok(())
}

/// The file name of `path` without its extension, used to name imported
/// layers.
pub fn file_stem(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}
