//! Convolution filters.
//!
//! Positions under the kernel that fall outside the image contribute nothing,
//! and the remaining weights are not renormalized. Border pixels therefore
//! come out darker (or lighter, for negative weights) than interior pixels of
//! the same color.

use crate::error::{Result, StrataError};
use crate::image::Image;
use crate::pixel::Pixel;

#[rustfmt::skip]
const BLUR_WEIGHTS: [f64; 9] = [
    0.0625, 0.125, 0.0625,
    0.125,  0.25,  0.125,
    0.0625, 0.125, 0.0625,
];

/// A square convolution kernel with an odd side length.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    side: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Build a kernel from its rows.
    ///
    /// Fails with [`StrataError::InvalidKernel`] unless every row has as many
    /// columns as there are rows and that count is odd.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let side = rows.len();
        let columns = rows.first().map_or(0, Vec::len);
        if side % 2 == 0 || rows.iter().any(|row| row.len() != side) {
            return Err(StrataError::InvalidKernel {
                rows: side,
                columns,
            });
        }
        Ok(Self {
            side,
            weights: rows.into_iter().flatten().collect(),
        })
    }

    /// The 3x3 blur kernel: 1/4 center, 1/8 edges, 1/16 corners.
    pub fn blur() -> Self {
        Self {
            side: 3,
            weights: BLUR_WEIGHTS.to_vec(),
        }
    }

    /// The 5x5 sharpen kernel: 1 at the center, 1/4 on the inner ring,
    /// -1/8 on the outer ring.
    pub fn sharpen() -> Self {
        let weights = (0..25)
            .map(|i| {
                let (row, col) = (i / 5, i % 5);
                if row == 2 && col == 2 {
                    1.0
                } else if (1..=3).contains(&row) && (1..=3).contains(&col) {
                    0.25
                } else {
                    -0.125
                }
            })
            .collect();
        Self { side: 5, weights }
    }

    /// Side length of the kernel.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Weight at `(row, col)`, or `None` outside the kernel.
    pub fn weight(&self, row: usize, col: usize) -> Option<f64> {
        (row < self.side && col < self.side).then(|| self.weights[row * self.side + col])
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Convolve every channel of `image` with `kernel`.
///
/// For the output at `(i, j)` the weight `kernel[dr + off][dc + off]` is
/// applied to the source pixel at `(i + dr, j + dc)`, with `off = side / 2`.
pub fn convolve(image: &Image, kernel: &Kernel) -> Result<Image> {
    let (width, height) = image.dimensions();
    let off = (kernel.side / 2) as i64;
    let mut out = Vec::with_capacity(image.pixel_count());

    for j in 0..height {
        for i in 0..width {
            let mut sum = [0.0f64; 3];
            for dr in -off..=off {
                let sx = i as i64 + dr;
                if sx < 0 || sx >= width as i64 {
                    continue;
                }
                for dc in -off..=off {
                    let sy = j as i64 + dc;
                    if sy < 0 || sy >= height as i64 {
                        continue;
                    }
                    let w = kernel.weights[(dr + off) as usize * kernel.side + (dc + off) as usize];
                    let src = image.at(sx as u32, sy as u32).rgb();
                    for (acc, channel) in sum.iter_mut().zip(src) {
                        *acc += w * f64::from(channel);
                    }
                }
            }
            out.push(Pixel::from_channels(i, j, sum[0], sum[1], sum[2]));
        }
    }

    image.with_pixels(width, height, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey_2x2() -> Image {
        let values = [[8u8, 16], [24, 32]];
        Image::from_fn(2, 2, |x, y| {
            let v = values[y as usize][x as usize];
            [v, v, v]
        })
        .unwrap()
    }

    fn grey(img: &Image, x: u32, y: u32) -> u8 {
        let [r, g, b] = img.pixel_at(x, y).unwrap().rgb();
        assert!(r == g && g == b);
        r
    }

    #[test]
    fn test_kernel_validation() {
        assert!(Kernel::new(vec![vec![1.0]]).is_ok());
        assert_eq!(
            Kernel::new(vec![vec![1.0, 0.0], vec![0.0, 1.0]]),
            Err(StrataError::InvalidKernel { rows: 2, columns: 2 })
        );
        assert!(Kernel::new(vec![vec![1.0, 0.0, 0.0]; 3]).is_ok());
        assert!(Kernel::new(vec![vec![1.0, 0.0]; 3]).is_err());
        assert!(Kernel::new(Vec::new()).is_err());
    }

    #[test]
    fn test_standard_kernels() {
        let blur = Kernel::blur();
        assert_eq!(blur.side(), 3);
        assert!((blur.total_weight() - 1.0).abs() < 1e-12);
        assert_eq!(blur.weight(1, 1), Some(0.25));
        assert_eq!(blur.weight(0, 1), Some(0.125));
        assert_eq!(blur.weight(2, 2), Some(0.0625));

        let sharpen = Kernel::sharpen();
        assert_eq!(sharpen.side(), 5);
        assert_eq!(sharpen.weight(2, 2), Some(1.0));
        assert_eq!(sharpen.weight(1, 3), Some(0.25));
        assert_eq!(sharpen.weight(0, 2), Some(-0.125));
        assert_eq!(sharpen.weight(5, 0), None);
    }

    #[test]
    fn test_blur_border_policy() {
        let out = convolve(&grey_2x2(), &Kernel::blur()).unwrap();
        assert_eq!(grey(&out, 0, 0), 9);
        assert_eq!(grey(&out, 1, 0), 10);
        assert_eq!(grey(&out, 0, 1), 12);
        assert_eq!(grey(&out, 1, 1), 13);
    }

    #[test]
    fn test_sharpen_border_policy() {
        let out = convolve(&grey_2x2(), &Kernel::sharpen()).unwrap();
        assert_eq!(grey(&out, 0, 0), 26);
        assert_eq!(grey(&out, 1, 0), 32);
        assert_eq!(grey(&out, 0, 1), 38);
        assert_eq!(grey(&out, 1, 1), 44);
    }

    #[test]
    fn test_identity_kernel() {
        let img = Image::from_fn(3, 3, |x, y| [x as u8 * 10, y as u8 * 10, 7]).unwrap();
        let identity = Kernel::new(vec![
            vec![0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ])
        .unwrap();
        assert_eq!(convolve(&img, &identity).unwrap(), img);
    }

    #[test]
    fn test_blur_interior_of_flat_image_is_unchanged() {
        let img = Image::filled(5, 5, [100, 100, 100]).unwrap();
        let out = convolve(&img, &Kernel::blur()).unwrap();
        assert_eq!(out.pixel_at(2, 2).unwrap().rgb(), [100, 100, 100]);
        // Corners only see 4 of the 9 weights: 0.25 + 2 * 0.125 + 0.0625.
        assert_eq!(out.pixel_at(0, 0).unwrap().rgb(), [56, 56, 56]);
    }
}
