//! Immutable raster images.
//!
//! An [`Image`] is a fully populated `width x height` grid of [`Pixel`]s. It
//! has no mutation methods; every transform builds a new image through
//! [`Image::new`] or [`Image::with_pixels`], which re-check the coverage
//! invariant (each position occupied exactly once, nothing out of bounds).
//!
//! # Example
//!
//! ```
//! use strata_core::{Image, Pixel};
//!
//! let pixels = vec![
//!     Pixel::from_rgb(0, 0, 255, 0, 0),
//!     Pixel::from_rgb(1, 0, 0, 255, 0),
//! ];
//! let image = Image::new(2, 1, pixels)?;
//! assert_eq!(image.pixel_at(1, 0)?.rgb(), [0, 255, 0]);
//! # Ok::<(), strata_core::StrataError>(())
//! ```

use crate::error::{Result, StrataError};
use crate::pixel::Pixel;

/// A rectangular grid of RGB pixels.
///
/// Pixels are stored row-major, so lookup by `(x, y)` is O(1). Lookups return
/// copies; nothing handed out can alter the stored grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Image {
    width: u32,
    height: u32,
    grid: Vec<Pixel>,
}

impl Image {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Build an image from an unordered set of pixels.
    ///
    /// Fails with, in order of checking:
    /// - [`StrataError::InvalidDimension`] if either side is zero,
    /// - [`StrataError::PixelCountMismatch`] if `pixels.len() != width * height`,
    /// - [`StrataError::PixelOutOfBounds`] if a pixel lies outside the grid,
    /// - [`StrataError::DuplicatePosition`] if two pixels share a position.
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        let expected = checked_area(width, height)?;
        if pixels.len() != expected {
            return Err(StrataError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let mut slots: Vec<Option<Pixel>> = vec![None; expected];
        for pixel in pixels {
            let (x, y) = pixel.position();
            if x >= width || y >= height {
                return Err(StrataError::PixelOutOfBounds {
                    x,
                    y,
                    width,
                    height,
                });
            }
            let slot = &mut slots[y as usize * width as usize + x as usize];
            if slot.is_some() {
                return Err(StrataError::DuplicatePosition { x, y });
            }
            *slot = Some(pixel);
        }

        // Count matched and no slot was filled twice, so every slot is filled.
        let grid: Vec<Pixel> = slots.into_iter().flatten().collect();
        debug_assert_eq!(grid.len(), expected);

        Ok(Self {
            width,
            height,
            grid,
        })
    }

    /// Build a new image of the same kind from fresh pixel data.
    ///
    /// Performs exactly the validation of [`Image::new`]; the receiver only
    /// serves as the factory and is not consulted.
    pub fn with_pixels(&self, width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        Self::new(width, height, pixels)
    }

    /// Build an image by evaluating `f` at every position, row by row.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> [u8; 3],
    {
        checked_area(width, height)?;
        Ok(Self::build(width, height, f))
    }

    /// Infallible form of [`Image::from_fn`] for callers holding already
    /// validated, non-zero dimensions.
    pub(crate) fn build<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> [u8; 3],
    {
        debug_assert!(width > 0 && height > 0);
        let mut grid = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let [r, g, b] = f(x, y);
                grid.push(Pixel::from_rgb(x, y, r, g, b));
            }
        }
        Self {
            width,
            height,
            grid,
        }
    }

    /// Build an image where every pixel has the same color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self> {
        Self::from_fn(width, height, |_, _| rgb)
    }

    // ========================================================================
    // PROPERTIES
    // ========================================================================

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The dimensions as a `(width, height)` tuple.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels, `width * height`.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.grid.len()
    }

    /// Whether `other` has the same width and height.
    #[inline]
    pub fn same_size(&self, other: &Image) -> bool {
        self.dimensions() == other.dimensions()
    }

    // ========================================================================
    // PIXEL ACCESS
    // ========================================================================

    /// A copy of the pixel at `(x, y)`.
    ///
    /// Fails with [`StrataError::CoordinateOutOfBounds`] outside the grid.
    pub fn pixel_at(&self, x: u32, y: u32) -> Result<Pixel> {
        if x >= self.width || y >= self.height {
            return Err(StrataError::CoordinateOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.at(x, y))
    }

    /// Iterate over copies of all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.grid.iter().copied()
    }

    /// Raw interleaved RGB bytes in row-major order, 3 bytes per pixel.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.grid.iter().flat_map(Pixel::rgb).collect()
    }

    /// Unchecked-by-`Result` access for the engine; callers stay in bounds.
    #[inline]
    pub(crate) fn at(&self, x: u32, y: u32) -> Pixel {
        self.grid[y as usize * self.width as usize + x as usize]
    }
}

fn checked_area(width: u32, height: u32) -> Result<usize> {
    if width < 1 || height < 1 {
        return Err(StrataError::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(StrataError::InvalidDimension { width, height })
}
