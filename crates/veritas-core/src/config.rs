//! Tunable pipeline parameters.
//!
//! Operators tune these to trade classifier precision against latency and
//! cost; nothing here is a hard-coded policy constant.

use std::time::Duration;

/// Knobs for the classification and status pipelines.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Heuristic confidence at or above which the external classifier is
    /// never consulted.
    pub confidence_threshold: f32,
    /// Upper bound on a single external classifier call.
    pub classifier_timeout: Duration,
    /// Staleness window for cached live statuses.
    pub status_ttl: Duration,
    /// Maximum entries retained in the category cache.
    pub category_cache_capacity: u64,
    /// Items classified concurrently per batch group.
    pub batch_size: usize,
    /// Pause between batch groups, to stay under classifier rate limits.
    pub batch_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.75,
            classifier_timeout: Duration::from_secs(5),
            status_ttl: Duration::from_secs(5 * 60),
            category_cache_capacity: 1000,
            batch_size: 5,
            batch_delay: Duration::from_millis(1000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.confidence_threshold, 0.75);
        assert_eq!(config.status_ttl, Duration::from_secs(300));
        assert_eq!(config.category_cache_capacity, 1000);
        assert_eq!(config.batch_size, 5);
    }
}
