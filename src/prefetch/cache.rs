//! Sliding-window cache of decoded assets
//!
//! Maps sequence index to decoded asset. Written by the background loader,
//! read and evicted by the foreground. Each `put` is a single map insert
//! under the write lock, so a reader never observes a partially published
//! entry.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::asset::Asset;

/// Shared handle to the prefetch cache.
///
/// Cloning is cheap; all clones refer to the same entries.
#[derive(Debug, Clone, Default)]
pub struct PrefetchCache {
    entries: Arc<RwLock<BTreeMap<usize, Arc<Asset>>>>,
}

impl PrefetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the asset at `index`.
    pub fn put(&self, index: usize, asset: Arc<Asset>) {
        self.write().insert(index, asset);
    }

    /// Look up the asset at `index` without blocking on decode.
    pub fn get(&self, index: usize) -> Option<Arc<Asset>> {
        self.read().get(&index).cloned()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.read().contains_key(&index)
    }

    /// Remove every entry with an index below `threshold`.
    ///
    /// Returns the number of entries removed.
    pub fn evict_before(&self, threshold: usize) -> usize {
        let mut entries = self.write();
        let kept = entries.split_off(&threshold);
        let removed = entries.len();
        *entries = kept;
        removed
    }

    /// Number of cached entries at or after `index`.
    pub fn count_at_or_after(&self, index: usize) -> usize {
        self.read().range(index..).count()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Snapshot of the cached indices in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.read().keys().copied().collect()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.write().clear();
    }

    // A writer that panicked mid-call never leaves a torn entry behind, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<usize, Arc<Asset>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<usize, Arc<Asset>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
