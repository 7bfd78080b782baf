//! The 8-bit RGB pixel value type.

use crate::error::{Result, StrataError};

/// A single positioned RGB sample.
///
/// Pixels are plain values: every accessor hands out a copy, and "editing" a
/// pixel means building a new one. Channel values are saturated into
/// `[0, 255]` at construction rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    x: u32,
    y: u32,
    r: u8,
    g: u8,
    b: u8,
}

impl Pixel {
    /// Create a pixel, clamping each channel into `[0, 255]`.
    ///
    /// Fails with [`StrataError::InvalidPosition`] if either coordinate is
    /// negative (or does not fit a `u32`).
    pub fn new(x: i64, y: i64, r: i32, g: i32, b: i32) -> Result<Self> {
        let (Ok(px), Ok(py)) = (u32::try_from(x), u32::try_from(y)) else {
            return Err(StrataError::InvalidPosition { x, y });
        };
        Ok(Self {
            x: px,
            y: py,
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        })
    }

    /// Create a pixel from already-valid parts.
    #[inline]
    pub const fn from_rgb(x: u32, y: u32, r: u8, g: u8, b: u8) -> Self {
        Self { x, y, r, g, b }
    }

    /// Create a pixel from floating point channel values.
    ///
    /// Each value is truncated toward zero and then saturated into
    /// `[0, 255]`; `NaN` becomes 0.
    #[inline]
    pub fn from_channels(x: u32, y: u32, r: f64, g: f64, b: f64) -> Self {
        Self {
            x,
            y,
            r: saturate(r),
            g: saturate(g),
            b: saturate(b),
        }
    }

    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// The `(x, y)` position.
    #[inline]
    pub fn position(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    #[inline]
    pub fn red(&self) -> u8 {
        self.r
    }

    #[inline]
    pub fn green(&self) -> u8 {
        self.g
    }

    #[inline]
    pub fn blue(&self) -> u8 {
        self.b
    }

    /// The channels as an `[r, g, b]` array.
    #[inline]
    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// A copy of this pixel with new channel values, clamped like [`Pixel::new`].
    #[must_use]
    pub fn with_rgb(&self, r: i32, g: i32, b: i32) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            ..*self
        }
    }

    /// A copy of this pixel moved to another position.
    #[must_use]
    pub fn moved_to(&self, x: u32, y: u32) -> Self {
        Self { x, y, ..*self }
    }
}

#[inline]
fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

#[inline]
fn saturate(value: f64) -> u8 {
    // `as` truncates toward zero and maps NaN to 0.
    value.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_in_range_channels() {
        let p = Pixel::new(3, 4, 10, 20, 30).unwrap();
        assert_eq!(p.position(), (3, 4));
        assert_eq!(p.rgb(), [10, 20, 30]);
    }

    #[test]
    fn test_new_clamps_channels() {
        let p = Pixel::new(0, 0, -12, 300, 255).unwrap();
        assert_eq!(p.rgb(), [0, 255, 255]);
    }

    #[test]
    fn test_negative_position_rejected() {
        assert_eq!(
            Pixel::new(-1, 0, 0, 0, 0),
            Err(StrataError::InvalidPosition { x: -1, y: 0 })
        );
        assert_eq!(
            Pixel::new(2, -7, 0, 0, 0),
            Err(StrataError::InvalidPosition { x: 2, y: -7 })
        );
    }

    #[test]
    fn test_from_channels_truncates() {
        let p = Pixel::from_channels(0, 0, 10.99, -3.5, 163.775);
        assert_eq!(p.rgb(), [10, 0, 163]);

        let p = Pixel::from_channels(0, 0, 1e9, f64::NAN, 254.9999);
        assert_eq!(p.rgb(), [255, 0, 254]);
    }

    #[test]
    fn test_with_rgb_is_a_new_value() {
        let original = Pixel::from_rgb(1, 2, 5, 5, 5);
        let edited = original.with_rgb(400, 6, -1);
        assert_eq!(original.rgb(), [5, 5, 5]);
        assert_eq!(edited.rgb(), [255, 6, 0]);
        assert_eq!(edited.position(), (1, 2));
    }
}
