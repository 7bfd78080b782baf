//! Append-only image history.
//!
//! [`ImageHistory`] is the plain ordered collection that the layer stack is
//! built on. On its own it behaves like an undo-free edit log: applying an
//! operation appends the result instead of replacing the source image.

use rand::Rng;
use tracing::debug;

use crate::error::{Result, StrataError};
use crate::image::Image;
use crate::logging::targets;
use crate::ops::{self, OperationKind, Transform};
use crate::pattern::PatternGenerator;

/// An ordered sequence of images addressed by zero-based index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageHistory {
    images: Vec<Image>,
}

impl ImageHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of images held.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the history holds no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Append an image to the end.
    pub fn add_image(&mut self, image: Image) {
        self.images.push(image);
        debug!(target: targets::HISTORY, len = self.images.len(), "image appended");
    }

    /// Append the image produced by `generator`.
    pub fn add_from_pattern<G: PatternGenerator + ?Sized>(&mut self, generator: &G) {
        self.add_image(generator.generate());
    }

    /// Remove and return the image at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<Image> {
        self.check_index(index)?;
        let removed = self.images.remove(index);
        debug!(target: targets::HISTORY, index, len = self.images.len(), "image removed");
        Ok(removed)
    }

    /// A copy of the image at `index`.
    pub fn image_at(&self, index: usize) -> Result<Image> {
        self.get(index).cloned()
    }

    /// Apply `kind` to the image at `index` and append the result.
    ///
    /// Mosaic draws its seeds from the thread-local RNG.
    pub fn apply_operation(&mut self, kind: OperationKind, index: usize) -> Result<()> {
        self.apply_operation_with_rng(kind, index, &mut rand::thread_rng())
    }

    /// Apply `kind` to the image at `index` and append the result, drawing
    /// randomness from `rng`.
    pub fn apply_operation_with_rng<R: Rng + ?Sized>(
        &mut self,
        kind: OperationKind,
        index: usize,
        rng: &mut R,
    ) -> Result<()> {
        let result = ops::apply_operation(kind, self.get(index)?, rng)?;
        self.images.push(result);
        debug!(
            target: targets::HISTORY,
            operation = kind.name(),
            source = index,
            len = self.images.len(),
            "operation result appended"
        );
        Ok(())
    }

    /// Apply an explicit transform to the image at `index` and append the result.
    pub fn apply_transform_with_rng<R: Rng + ?Sized>(
        &mut self,
        transform: &Transform,
        index: usize,
        rng: &mut R,
    ) -> Result<()> {
        let result = transform.apply(self.get(index)?, rng)?;
        self.images.push(result);
        Ok(())
    }

    /// Iterate over the images in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Image> {
        self.images.iter()
    }

    /// The last image, if any.
    pub fn last(&self) -> Option<&Image> {
        self.images.last()
    }

    pub(crate) fn get(&self, index: usize) -> Result<&Image> {
        self.images.get(index).ok_or(StrataError::OutOfBounds {
            index,
            len: self.images.len(),
        })
    }

    /// Swap in `image` at `index`, keeping every other position unchanged.
    pub(crate) fn replace_at(&mut self, index: usize, image: Image) -> Result<Image> {
        self.check_index(index)?;
        let mut above = self.images.split_off(index);
        let rest = above.split_off(1);
        self.images.push(image);
        self.images.extend(rest);
        above.pop().ok_or(StrataError::OutOfBounds {
            index,
            len: self.images.len(),
        })
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.images.len() {
            Ok(())
        } else {
            Err(StrataError::OutOfBounds {
                index,
                len: self.images.len(),
            })
        }
    }
}

impl<'a> IntoIterator for &'a ImageHistory {
    type Item = &'a Image;
    type IntoIter = std::slice::Iter<'a, Image>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}
