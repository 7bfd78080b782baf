//! Linear color-matrix transforms.

use crate::error::Result;
use crate::image::Image;
use crate::pixel::Pixel;

/// A 3x3 linear map from input RGB to output RGB.
///
/// Row `k` produces output channel `k` (red, green, blue) as the dot product
/// of the row with the input `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [[f64; 3]; 3]);

impl ColorMatrix {
    /// Rec. 709 luminance weights on every row.
    pub const GREYSCALE: Self = Self([
        [0.2126, 0.7152, 0.0722],
        [0.2126, 0.7152, 0.0722],
        [0.2126, 0.7152, 0.0722],
    ]);

    /// The classic sepia tone matrix.
    pub const SEPIA: Self = Self([
        [0.393, 0.769, 0.189],
        [0.349, 0.686, 0.168],
        [0.272, 0.534, 0.131],
    ]);

    /// Leaves every color unchanged.
    pub const IDENTITY: Self = Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// Map one pixel, keeping its position.
    pub fn map(&self, pixel: Pixel) -> Pixel {
        let [r, g, b] = pixel.rgb().map(f64::from);
        let [red, green, blue] = self.0.map(|row| row[0] * r + row[1] * g + row[2] * b);
        Pixel::from_channels(pixel.x(), pixel.y(), red, green, blue)
    }
}

/// Apply `matrix` to every pixel of `image`.
pub fn color_transform(image: &Image, matrix: &ColorMatrix) -> Result<Image> {
    let pixels = image.pixels().map(|p| matrix.map(p)).collect();
    image.with_pixels(image.width(), image.height(), pixels)
}
