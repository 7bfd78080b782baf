//! The pixel operation engine.
//!
//! Every operation is a pure function from an [`Image`] to a new image of the
//! same size, computed position by position. Operations come in three
//! families, modeled as the variants of [`Transform`]:
//!
//! - **Convolution** ([`Kernel`]): blur and sharpen.
//! - **Color matrix** ([`ColorMatrix`]): greyscale and sepia.
//! - **Mosaic**: randomized clustering around seed positions.
//!
//! Callers usually name an operation by its [`OperationKind`] and let
//! [`apply_operation`] resolve the standard parameters.
//!
//! # Example
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use strata_core::ops::{apply_operation, OperationKind};
//! use strata_core::Image;
//!
//! let image = Image::filled(4, 4, [100, 125, 150])?;
//! let mut rng = StdRng::seed_from_u64(1);
//! let grey = apply_operation(OperationKind::Greyscale, &image, &mut rng)?;
//! assert_eq!(grey.pixel_at(0, 0)?.rgb(), [121, 121, 121]);
//! # Ok::<(), strata_core::StrataError>(())
//! ```

mod color;
mod convolve;
mod mosaic;

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{Result, StrataError};
use crate::image::Image;

pub use color::{ColorMatrix, color_transform};
pub use convolve::{Kernel, convolve};
pub use mosaic::mosaic;

/// Fraction of an image's pixels used as mosaic seeds by default.
pub const DEFAULT_MOSAIC_SEED_RATIO: f64 = 0.04;

/// A fully parameterized pixel operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// Convolve each channel with the kernel.
    Convolve(Kernel),
    /// Map each pixel's color through the matrix.
    ColorMatrix(ColorMatrix),
    /// Cluster around this many random seeds.
    Mosaic { seeds: usize },
}

impl Transform {
    /// Run the transform on `image`.
    ///
    /// `rng` is only drawn from by [`Transform::Mosaic`].
    pub fn apply<R>(&self, image: &Image, rng: &mut R) -> Result<Image>
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Convolve(kernel) => convolve(image, kernel),
            Self::ColorMatrix(matrix) => color_transform(image, matrix),
            Self::Mosaic { seeds } => mosaic(image, *seeds, rng),
        }
    }

    /// Whether the output depends on the random source.
    pub fn is_randomized(&self) -> bool {
        matches!(self, Self::Mosaic { .. })
    }
}

/// The closed set of named operations a layer stack can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Blur,
    Sharpen,
    Greyscale,
    Sepia,
    Mosaic,
}

impl OperationKind {
    /// All operation kinds, in declaration order.
    pub const ALL: [OperationKind; 5] = [
        Self::Blur,
        Self::Sharpen,
        Self::Greyscale,
        Self::Sepia,
        Self::Mosaic,
    ];

    /// The lowercase identifier of this operation.
    pub fn name(self) -> &'static str {
        match self {
            Self::Blur => "blur",
            Self::Sharpen => "sharpen",
            Self::Greyscale => "greyscale",
            Self::Sepia => "sepia",
            Self::Mosaic => "mosaic",
        }
    }

    /// Resolve the standard parameters for running this operation on `image`.
    ///
    /// Mosaic uses `floor(seed_ratio * pixel_count)` seeds, but never fewer
    /// than one.
    pub fn transform_for(self, image: &Image, seed_ratio: f64) -> Transform {
        match self {
            Self::Blur => Transform::Convolve(Kernel::blur()),
            Self::Sharpen => Transform::Convolve(Kernel::sharpen()),
            Self::Greyscale => Transform::ColorMatrix(ColorMatrix::GREYSCALE),
            Self::Sepia => Transform::ColorMatrix(ColorMatrix::SEPIA),
            Self::Mosaic => Transform::Mosaic {
                seeds: default_seed_count(image.pixel_count(), seed_ratio),
            },
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperationKind {
    type Err = StrataError;

    /// Parse a case-insensitive identifier; "grayscale" is accepted too.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blur" => Ok(Self::Blur),
            "sharpen" => Ok(Self::Sharpen),
            "greyscale" | "grayscale" => Ok(Self::Greyscale),
            "sepia" => Ok(Self::Sepia),
            "mosaic" => Ok(Self::Mosaic),
            _ => Err(StrataError::UnknownOperation {
                name: s.to_string(),
            }),
        }
    }
}

/// Seed count for the default mosaic policy.
pub fn default_seed_count(pixel_count: usize, seed_ratio: f64) -> usize {
    let seeds = (pixel_count as f64 * seed_ratio).floor() as usize;
    seeds.clamp(1, pixel_count.max(1))
}

/// Apply the named operation with its standard parameters.
pub fn apply_operation<R>(kind: OperationKind, image: &Image, rng: &mut R) -> Result<Image>
where
    R: Rng + ?Sized,
{
    kind.transform_for(image, DEFAULT_MOSAIC_SEED_RATIO)
        .apply(image, rng)
}

/// Apply an operation given by its identifier.
///
/// Fails with [`StrataError::UnknownOperation`] for identifiers outside
/// [`OperationKind`].
pub fn apply_named<R>(name: &str, image: &Image, rng: &mut R) -> Result<Image>
where
    R: Rng + ?Sized,
{
    apply_operation(name.parse()?, image, rng)
}
