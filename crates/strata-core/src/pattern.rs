//! Deterministic image generators.

use crate::error::{Result, StrataError};
use crate::image::Image;

const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];

/// Something that can produce an [`Image`] on demand.
///
/// Generators are pure: the same generator always yields the same image.
/// Parameter validation happens when the generator is built, so
/// `generate` itself cannot fail.
pub trait PatternGenerator {
    /// Build the image this generator describes.
    fn generate(&self) -> Image;
}

/// A black and white checkerboard.
///
/// Squares are `cell_size` pixels on a side; the square touching the origin is
/// white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkerboard {
    width: u32,
    height: u32,
    cell_size: u32,
}

impl Checkerboard {
    /// Create a checkerboard generator.
    ///
    /// Fails with [`StrataError::InvalidDimension`] for a zero width or height
    /// and [`StrataError::InvalidCellSize`] for a zero cell size.
    pub fn new(width: u32, height: u32, cell_size: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(StrataError::InvalidDimension { width, height });
        }
        if cell_size == 0 {
            return Err(StrataError::InvalidCellSize { cell_size });
        }
        Ok(Self {
            width,
            height,
            cell_size,
        })
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    fn color_at(&self, x: u32, y: u32) -> [u8; 3] {
        if (x / self.cell_size + y / self.cell_size) % 2 == 0 {
            WHITE
        } else {
            BLACK
        }
    }
}

impl PatternGenerator for Checkerboard {
    fn generate(&self) -> Image {
        Image::build(self.width, self.height, |x, y| self.color_at(x, y))
    }
}

impl<F> PatternGenerator for F
where
    F: Fn() -> Image,
{
    fn generate(&self) -> Image {
        self()
    }
}
