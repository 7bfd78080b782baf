//! Error types for the layer stack and the operation engine.

use thiserror::Error;

/// Errors raised by image construction, the operation engine, and the layer stack.
///
/// Every variant carries the offending value so a caller can build its own
/// message without parsing the `Display` output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrataError {
    /// A pixel coordinate is negative or does not fit in `u32`.
    #[error("invalid pixel position ({x}, {y}): coordinates must be non-negative 32-bit values")]
    InvalidPosition { x: i64, y: i64 },

    /// Image width or height is less than one.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// The number of supplied pixels does not match `width * height`.
    #[error("expected {expected} pixels, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },

    /// A supplied pixel lies outside the image it is meant to populate.
    #[error("pixel ({x}, {y}) lies outside a {width}x{height} image")]
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Two supplied pixels share the same position.
    #[error("pixel position ({x}, {y}) is already occupied")]
    DuplicatePosition { x: u32, y: u32 },

    /// A layer index is outside `[0, len)`.
    #[error("layer index {index} out of bounds (layer count {len})")]
    OutOfBounds { index: usize, len: usize },

    /// A pixel lookup is outside the image.
    #[error("coordinate ({x}, {y}) out of bounds for a {width}x{height} image")]
    CoordinateOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// No name is registered for the index.
    #[error("no layer name registered at index {index}")]
    UnknownIndex { index: usize },

    /// An inserted image does not match the size of the existing layers.
    #[error("layer must be {expected_width}x{expected_height}, got {width}x{height}")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    /// An operation targeted a layer other than the current one.
    #[error("cannot apply operation to layer {index}: current layer is {current:?}")]
    NotCurrentLayer {
        index: usize,
        current: Option<usize>,
    },

    /// A convolution kernel is empty, not square, or has an even side.
    #[error("kernel must be square with an odd side, got {rows} rows of {columns} columns")]
    InvalidKernel { rows: usize, columns: usize },

    /// A mosaic seed count outside `[1, pixel_count]`.
    #[error("seed count {seeds} must be between 1 and {pixel_count}")]
    InvalidSeedCount { seeds: usize, pixel_count: usize },

    /// An operation identifier that names no known operation.
    #[error("unknown operation '{name}'")]
    UnknownOperation { name: String },

    /// A pattern cell size of zero.
    #[error("pattern cell size must be positive, got {cell_size}")]
    InvalidCellSize { cell_size: u32 },

    /// A layer cannot be renamed to the empty string.
    #[error("layer names cannot be empty")]
    EmptyName,

    /// Configuration could not be parsed or failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl StrataError {
    /// Returns true for errors raised while validating pixels or images.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidPosition { .. }
                | Self::InvalidDimension { .. }
                | Self::PixelCountMismatch { .. }
                | Self::PixelOutOfBounds { .. }
                | Self::DuplicatePosition { .. }
                | Self::InvalidCellSize { .. }
                | Self::EmptyName
        )
    }

    /// Returns true for errors caused by an index or coordinate outside the valid range.
    pub fn is_bounds(&self) -> bool {
        matches!(
            self,
            Self::OutOfBounds { .. } | Self::CoordinateOutOfBounds { .. } | Self::UnknownIndex { .. }
        )
    }

    /// Returns true for errors raised before the operation engine touched any pixel.
    pub fn is_operation_parameter(&self) -> bool {
        matches!(
            self,
            Self::InvalidKernel { .. } | Self::InvalidSeedCount { .. } | Self::UnknownOperation { .. }
        )
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, StrataError>;
