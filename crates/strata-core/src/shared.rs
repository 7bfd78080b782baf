//! A layer stack behind a single exclusive lock.
//!
//! The stack's invariants span its layers, pointer, hidden set and names, so
//! concurrent sessions share one `parking_lot::Mutex` around the whole model
//! rather than locking the facets separately.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::config::StackConfig;
use crate::error::Result;
use crate::stack::LayerStack;

/// A cloneable, thread-safe handle to one [`LayerStack`].
#[derive(Debug, Clone, Default)]
pub struct SharedLayerStack {
    inner: Arc<Mutex<LayerStack>>,
}

impl SharedLayerStack {
    /// Wrap an existing stack.
    pub fn new(stack: LayerStack) -> Self {
        Self {
            inner: Arc::new(Mutex::new(stack)),
        }
    }

    /// Create an empty shared stack with a custom configuration.
    pub fn with_config(config: StackConfig) -> Result<Self> {
        Ok(Self::new(LayerStack::with_config(config)?))
    }

    /// Acquire the lock.
    pub fn lock(&self) -> MutexGuard<'_, LayerStack> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the stack.
    pub fn with<T>(&self, f: impl FnOnce(&mut LayerStack) -> T) -> T {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Clone the current state of the stack.
    pub fn snapshot(&self) -> LayerStack {
        self.inner.lock().clone()
    }
}

impl From<LayerStack> for SharedLayerStack {
    fn from(stack: LayerStack) -> Self {
        Self::new(stack)
    }
}
