//! Bounded cache for classification results.

use moka::sync::Cache;
use tracing::debug;
use veritas_core::ClassificationResult;

/// Classification results keyed by [`crate::classification_key`] digests.
///
/// Proposal text does not change meaning once classified, so entries carry
/// no TTL; growth is bounded instead by a configurable capacity with LRU-style
/// eviction, keeping a long-running process from accumulating one entry per
/// proposal ever seen.
pub struct CategoryCache {
    inner: Cache<u64, ClassificationResult>,
}

impl CategoryCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::new(capacity),
        }
    }

    pub fn get(&self, key: u64) -> Option<ClassificationResult> {
        self.inner.get(&key)
    }

    /// Idempotent: re-inserting under the same key simply overwrites.
    pub fn insert(&self, key: u64, result: ClassificationResult) {
        self.inner.insert(key, result);
    }

    pub fn clear(&self) {
        debug!("clearing category cache");
        self.inner.invalidate_all();
    }

    /// Current entry count, after draining pending eviction work.
    pub fn len(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
