//! Core model for the Strata layered image editor.
//!
//! This crate provides:
//!
//! - **Pixels and images**: immutable [`Pixel`] and [`Image`] value types
//! - **Patterns**: the [`PatternGenerator`] trait and a [`Checkerboard`]
//! - **Operations**: blur, sharpen, greyscale, sepia and mosaic in [`ops`]
//! - **Layer stack**: [`LayerStack`], an ordered set of same-sized layers
//!   with a current pointer, hidden flags and unique names
//! - **History**: [`ImageHistory`], the plain append-only mode
//! - **Sharing**: [`SharedLayerStack`] for use across threads
//!
//! # Example
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use strata_core::{Checkerboard, LayerStack, OperationKind};
//!
//! let mut stack = LayerStack::new();
//! let index = stack.add_from_pattern(&Checkerboard::new(20, 20, 5)?)?;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! stack.apply_operation_with_rng(OperationKind::Mosaic, index, &mut rng)?;
//! stack.apply_operation(OperationKind::Blur, index)?;
//!
//! assert_eq!(stack.layer_count(), 1);
//! assert_eq!(stack.image_at(index)?.dimensions(), (20, 20));
//! # Ok::<(), strata_core::StrataError>(())
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod image;
pub mod logging;
pub mod ops;
pub mod pattern;
pub mod pixel;
pub mod shared;
pub mod stack;

pub use config::StackConfig;
pub use error::{Result, StrataError};
pub use history::ImageHistory;
pub use image::Image;
pub use logging::{ListStyle, StackDebug};
pub use ops::{ColorMatrix, Kernel, OperationKind, Transform};
pub use pattern::{Checkerboard, PatternGenerator};
pub use pixel::Pixel;
pub use shared::SharedLayerStack;
pub use stack::LayerStack;
