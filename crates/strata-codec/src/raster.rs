//! Compressed raster formats backed by the `image` crate.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat as ImgFormat, RgbImage};
use strata_core::Image;

use crate::Codec;
use crate::error::{CodecError, Result};

/// Codec for PNG or JPEG data.
///
/// Decoding drops any alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterCodec {
    format: ImgFormat,
}

impl RasterCodec {
    /// Lossless PNG.
    pub fn png() -> Self {
        Self {
            format: ImgFormat::Png,
        }
    }

    /// Lossy JPEG at the encoder's default quality.
    pub fn jpeg() -> Self {
        Self {
            format: ImgFormat::Jpeg,
        }
    }

    /// Canonical file extension of the wrapped format.
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("")
    }
}

impl Codec for RasterCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Image> {
        let decoded = image::load_from_memory_with_format(bytes, self.format)?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(Image::from_fn(width, height, |x, y| rgb.get_pixel(x, y).0)?)
    }

    fn encode(&self, image: &Image) -> Result<Vec<u8>> {
        let (width, height) = image.dimensions();
        let rgb = RgbImage::from_raw(width, height, image.to_rgb_bytes()).ok_or_else(|| {
            CodecError::Raster(format!("pixel buffer does not fit {width}x{height}"))
        })?;
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(rgb).write_to(&mut buffer, self.format)?;
        Ok(buffer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> Image {
        Image::from_fn(6, 4, |x, y| [x as u8 * 40, y as u8 * 60, 200]).unwrap()
    }

    #[test]
    fn test_png_is_lossless() {
        let codec = RasterCodec::png();
        let bytes = codec.encode(&gradient()).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(codec.decode(&bytes).unwrap(), gradient());
    }

    #[test]
    fn test_jpeg_keeps_dimensions() {
        let codec = RasterCodec::jpeg();
        let bytes = codec.encode(&gradient()).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(codec.decode(&bytes).unwrap().dimensions(), (6, 4));
    }

    #[test]
    fn test_garbage_is_a_raster_error() {
        let err = RasterCodec::png().decode(b"definitely not a png").unwrap_err();
        assert!(matches!(err, CodecError::Raster(_)));
    }

    #[test]
    fn test_extension() {
        assert_eq!(RasterCodec::png().extension(), "png");
        assert_eq!(RasterCodec::jpeg().extension(), "jpg");
    }
}
