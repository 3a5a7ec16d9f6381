//! TTL-bounded cache for live proposal statuses.

use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;
use veritas_core::StatusResult;

/// Normalized statuses keyed by project identifier.
///
/// Unlike categories, a proposal's live status changes over time, so every
/// entry expires after the configured TTL and polling picks up the fresh
/// value within that staleness window.
pub struct StatusCache {
    inner: Cache<String, StatusResult>,
}

impl StatusCache {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Cache::builder().time_to_live(ttl).build(),
        }
    }

    pub fn get(&self, project_id: &str) -> Option<StatusResult> {
        self.inner.get(project_id)
    }

    pub fn insert(&self, project_id: String, result: StatusResult) {
        self.inner.insert(project_id, result);
    }

    pub fn clear(&self) {
        debug!("clearing status cache");
        self.inner.invalidate_all();
    }

    /// Current entry count, after draining pending expiry work.
    pub fn len(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
