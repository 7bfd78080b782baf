//! The layer stack model.
//!
//! A [`LayerStack`] is an ordered set of equally sized images plus three
//! facets kept in lockstep with it: the current-layer pointer, the set of
//! hidden layers and the name registry. Every mutator validates first and
//! only then touches state, so a returned error always means the stack is
//! exactly as it was before the call.
//!
//! ```
//! use strata_core::{Checkerboard, LayerStack, OperationKind};
//!
//! let mut stack = LayerStack::new();
//! stack.add_from_pattern(&Checkerboard::new(8, 8, 2)?)?;
//! stack.add_blank_layer()?;
//! assert_eq!(stack.layer_count(), 2);
//! assert_eq!(stack.current_layer(), Some(1));
//!
//! stack.make_layer_invisible(0)?;
//! stack.apply_operation(OperationKind::Sepia, 1)?;
//! assert_eq!(stack.name_at(1), Some("new blank"));
//! # Ok::<(), strata_core::StrataError>(())
//! ```

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use tracing::debug;

use crate::config::StackConfig;
use crate::error::{Result, StrataError};
use crate::history::ImageHistory;
use crate::image::Image;
use crate::logging::targets;
use crate::ops::{OperationKind, Transform};
use crate::pattern::PatternGenerator;

/// Ordered, uniformly sized image layers with a current pointer, hidden set
/// and unique names.
///
/// Index 0 is the bottom layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStack {
    layers: ImageHistory,
    current: Option<usize>,
    invisible: BTreeSet<usize>,
    names: BTreeMap<usize, String>,
    config: StackConfig,
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStack {
    /// Create an empty stack with the default configuration.
    pub fn new() -> Self {
        Self {
            layers: ImageHistory::new(),
            current: None,
            invisible: BTreeSet::new(),
            names: BTreeMap::new(),
            config: StackConfig::default(),
        }
    }

    /// Create an empty stack with a custom configuration.
    pub fn with_config(config: StackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// The configuration in effect.
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Append `image` as the new top layer and make it current.
    ///
    /// Returns the new layer's index. Fails with
    /// [`StrataError::DimensionMismatch`] when the stack already holds layers
    /// of a different size.
    pub fn add_image(&mut self, image: Image) -> Result<usize> {
        let index = self.layers.len();
        self.insert_top(image, format!("placeholder #{index}"))
    }

    /// Append a blank layer sized like the top layer, or to the configured
    /// default size when the stack is empty.
    pub fn add_blank_layer(&mut self) -> Result<usize> {
        let (width, height) = match self.layers.last() {
            Some(top) => top.dimensions(),
            None => (self.config.blank_width, self.config.blank_height),
        };
        let image = Image::filled(width, height, self.config.blank_color)?;
        let name = self.config.blank_name.clone();
        self.insert_top(image, name)
    }

    /// Append the image produced by `generator`.
    pub fn add_from_pattern<G: PatternGenerator + ?Sized>(&mut self, generator: &G) -> Result<usize> {
        let index = self.layers.len();
        self.insert_top(generator.generate(), format!("new pattern #{index}"))
    }

    fn insert_top(&mut self, image: Image, base_name: String) -> Result<usize> {
        if let Some(top) = self.layers.last() {
            if !top.same_size(&image) {
                return Err(StrataError::DimensionMismatch {
                    expected_width: top.width(),
                    expected_height: top.height(),
                    width: image.width(),
                    height: image.height(),
                });
            }
        }

        let name = self.unique_name(base_name);
        let index = self.layers.len();
        let (width, height) = image.dimensions();
        self.layers.add_image(image);
        self.current = Some(index);
        debug!(target: targets::STACK, index, width, height, name = %name, "layer added");
        self.names.insert(index, name);
        Ok(index)
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Remove the layer at `index` and return its image.
    ///
    /// Hidden flags and names above `index` shift down by one. The current
    /// pointer follows its layer when a lower layer is removed, and falls to
    /// the layer below when the current layer itself is removed.
    pub fn remove_at(&mut self, index: usize) -> Result<Image> {
        self.check_index(index)?;

        let remaining = self.layers.len() - 1;
        self.current = match self.current {
            _ if remaining == 0 => None,
            Some(current) if current == index => Some(index.saturating_sub(1)),
            Some(current) if current > index => Some(current - 1),
            other => other,
        };

        self.invisible = self
            .invisible
            .iter()
            .filter(|&&hidden| hidden != index)
            .map(|&hidden| if hidden > index { hidden - 1 } else { hidden })
            .collect();

        self.names = std::mem::take(&mut self.names)
            .into_iter()
            .filter(|(key, _)| *key != index)
            .map(|(key, name)| if key > index { (key - 1, name) } else { (key, name) })
            .collect();

        let removed = self.layers.remove_at(index)?;
        debug!(target: targets::STACK, index, remaining, current = ?self.current, "layer removed");
        Ok(removed)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Replace the current layer with `kind` applied to it.
    ///
    /// `index` must equal [`current_layer`](Self::current_layer). Mosaic
    /// seeds come from the thread-local RNG, so its output differs between
    /// calls.
    pub fn apply_operation(&mut self, kind: OperationKind, index: usize) -> Result<()> {
        self.apply_operation_with_rng(kind, index, &mut rand::thread_rng())
    }

    /// [`apply_operation`](Self::apply_operation) with an explicit random
    /// source.
    pub fn apply_operation_with_rng<R: Rng + ?Sized>(
        &mut self,
        kind: OperationKind,
        index: usize,
        rng: &mut R,
    ) -> Result<()> {
        self.ensure_current(index)?;
        let transform = kind.transform_for(self.layers.get(index)?, self.config.mosaic_seed_ratio);
        self.replace_with(&transform, index, rng)?;
        debug!(target: targets::STACK, operation = kind.name(), index, "operation applied");
        Ok(())
    }

    /// Replace the current layer with an explicit transform applied to it.
    pub fn apply_transform_with_rng<R: Rng + ?Sized>(
        &mut self,
        transform: &Transform,
        index: usize,
        rng: &mut R,
    ) -> Result<()> {
        self.ensure_current(index)?;
        self.replace_with(transform, index, rng)?;
        debug!(target: targets::STACK, ?transform, index, "transform applied");
        Ok(())
    }

    fn replace_with<R: Rng + ?Sized>(
        &mut self,
        transform: &Transform,
        index: usize,
        rng: &mut R,
    ) -> Result<()> {
        let result = transform.apply(self.layers.get(index)?, rng)?;
        self.layers.replace_at(index, result)?;
        self.current = Some(index);
        Ok(())
    }

    fn ensure_current(&self, index: usize) -> Result<()> {
        if self.current != Some(index) {
            return Err(StrataError::NotCurrentLayer {
                index,
                current: self.current,
            });
        }
        self.check_index(index)
    }

    // =========================================================================
    // Names, pointer and visibility
    // =========================================================================

    /// Rename the layer at `index`, suffixing the name until it is unique.
    ///
    /// The layer's own current name counts as taken. Returns the stored name.
    pub fn rename_layer_at(&mut self, index: usize, name: &str) -> Result<String> {
        if !self.names.contains_key(&index) {
            return Err(StrataError::UnknownIndex { index });
        }
        if name.is_empty() {
            return Err(StrataError::EmptyName);
        }
        let name = self.unique_name(name.to_string());
        debug!(target: targets::STACK, index, name = %name, "layer renamed");
        self.names.insert(index, name.clone());
        Ok(name)
    }

    /// Make `index` the current layer.
    pub fn set_current_layer(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.current = Some(index);
        debug!(target: targets::STACK, index, "current layer set");
        Ok(())
    }

    /// Clear the hidden flag of `index`.
    pub fn make_layer_visible(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if self.invisible.remove(&index) {
            debug!(target: targets::STACK, index, "layer shown");
        }
        Ok(())
    }

    /// Set the hidden flag of `index`.
    pub fn make_layer_invisible(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if self.invisible.insert(index) {
            debug!(target: targets::STACK, index, "layer hidden");
        }
        Ok(())
    }

    fn unique_name(&self, mut candidate: String) -> String {
        while self.names.values().any(|existing| *existing == candidate) {
            candidate.push_str(&self.config.copy_suffix);
        }
        candidate
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.layers.len();
        if index < len {
            Ok(())
        } else {
            Err(StrataError::OutOfBounds { index, len })
        }
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Whether the stack holds no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Index of the current layer, `None` when the stack is empty.
    pub fn current_layer(&self) -> Option<usize> {
        self.current
    }

    /// Whether the layer at `index` is hidden.
    pub fn is_invisible(&self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        Ok(self.invisible.contains(&index))
    }

    /// Snapshot of the hidden indices.
    pub fn invisible_indices(&self) -> BTreeSet<usize> {
        self.invisible.clone()
    }

    /// Snapshot of the index to name mapping.
    pub fn names(&self) -> BTreeMap<usize, String> {
        self.names.clone()
    }

    /// Name of the layer at `index`.
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get(&index).map(String::as_str)
    }

    /// A copy of the layer at `index`.
    pub fn image_at(&self, index: usize) -> Result<Image> {
        self.layers.image_at(index)
    }

    /// The size every layer shares, `None` when the stack is empty.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.layers.last().map(Image::dimensions)
    }

    /// A copy of the top layer.
    pub fn topmost(&self) -> Option<Image> {
        self.layers.last().cloned()
    }
}
