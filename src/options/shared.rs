//! Shared options context
//!
//! Holds a plugin's active options behind an `Arc`. Readers take a snapshot;
//! replacing the options swaps the pointer, so readers never see a
//! half-written object.

use std::sync::Arc;
use parking_lot::RwLock;
use super::merge::merge_options;
use super::record::PluginOptions;

#[derive(Debug)]
pub struct SharedOptions<T> {
    inner: RwLock<Arc<T>>,
}

impl<T: PluginOptions> SharedOptions<T> {
    pub fn new(options: T) -> Self {
        Self { inner: RwLock::new(Arc::new(options)) }
    }

    /// Current options; stays valid across later replacements
    pub fn snapshot(&self) -> Arc<T> {
        Arc::clone(&self.inner.read())
    }

    /// Swap in new options, returning the previous ones
    pub fn replace(&self, options: T) -> Arc<T> {
        std::mem::replace(&mut *self.inner.write(), Arc::new(options))
    }

    /// Copy-on-write modification
    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        let mut guard = self.inner.write();
        f(Arc::make_mut(&mut guard));
    }

    /// Append the records of `incoming`
    pub fn merge(&self, incoming: T) {
        self.update(|current| merge_options(current, incoming));
    }
}

impl<T: PluginOptions> Default for SharedOptions<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
