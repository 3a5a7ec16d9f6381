//! Refinement orchestration: heuristic baseline, threshold-gated AI
//! refinement, caching, and batch admission control.
//!
//! The pipeline always produces a result. Backend failures, timeouts and
//! malformed replies are logged and absorbed; the caller never sees an
//! error for "could not classify".

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use veritas_cache::{CategoryCache, StatusCache, classification_key};
use veritas_core::{
    ClassificationInput, ClassificationResult, PipelineConfig, StatusResult,
};

use crate::backend::{BackendError, ClassifierBackend};
use crate::catalog::PatternCatalog;
use crate::heuristic::classify_heuristically;
use crate::prompt::{full_context_prompt, parse_bare_category, parse_structured_reply, simple_prompt};
use crate::status::normalize_status;

/// Entry counts of the two result caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    pub category_entries: u64,
    pub status_entries: u64,
}

/// The classification and status pipeline.
///
/// Owns its caches (constructed once per process, dropped on shutdown) and,
/// optionally, a handle to an external classifier. Without a backend the
/// pipeline is purely heuristic and fully offline.
pub struct Pipeline {
    catalog: PatternCatalog,
    config: PipelineConfig,
    backend: Option<Arc<dyn ClassifierBackend>>,
    categories: CategoryCache,
    statuses: StatusCache,
}

impl Pipeline {
    pub fn new(
        catalog: PatternCatalog,
        config: PipelineConfig,
        backend: Option<Arc<dyn ClassifierBackend>>,
    ) -> Self {
        let categories = CategoryCache::new(config.category_cache_capacity);
        let statuses = StatusCache::with_ttl(config.status_ttl);
        Self {
            catalog,
            config,
            backend,
            categories,
            statuses,
        }
    }

    /// Classify one proposal.
    ///
    /// Cache first; then the heuristic baseline; then, only when the
    /// baseline is below the confidence threshold, up to two external
    /// classifier calls. Every completed classification is committed to the
    /// cache before returning, so identical inputs are answered from memory
    /// regardless of backend health.
    pub async fn classify(&self, input: &ClassificationInput) -> ClassificationResult {
        let key = classification_key(&input.text, &input.keywords);
        if let Some(hit) = self.categories.get(key) {
            debug!(key, "classification cache hit");
            return hit;
        }

        let baseline = classify_heuristically(&self.catalog, &input.text, &input.keywords);

        let result = if baseline.confidence >= self.config.confidence_threshold {
            baseline
        } else {
            self.refine(input, baseline).await
        };

        self.categories.insert(key, result.clone());
        result
    }

    /// Two-tier AI refinement with the heuristic result as the floor.
    async fn refine(
        &self,
        input: &ClassificationInput,
        baseline: ClassificationResult,
    ) -> ClassificationResult {
        let Some(backend) = &self.backend else {
            return baseline;
        };

        // Tier 1: full-context structured prompt, exact category validation.
        if let Some(context) = &input.full_context {
            let prompt = full_context_prompt(&self.catalog, input, context);
            match self.invoke(backend.as_ref(), &prompt).await {
                Ok(raw) => match parse_structured_reply(&raw) {
                    Some(reply) => {
                        debug!(category = %reply.category, confidence = reply.confidence, "full-context reply accepted");
                        return ClassificationResult {
                            category: reply.category,
                            confidence: reply.confidence,
                            scores: baseline.scores,
                        };
                    }
                    None => warn!("full-context reply unparseable or off-enumeration"),
                },
                Err(error) => warn!(%error, "full-context classifier call failed"),
            }
        }

        // Tier 2: simplified bare-name prompt, lenient matching.
        let prompt = simple_prompt(&input.text, &input.keywords);
        match self.invoke(backend.as_ref(), &prompt).await {
            Ok(raw) => {
                if let Some(category) = parse_bare_category(&raw) {
                    debug!(%category, "simplified reply accepted");
                    return ClassificationResult {
                        category,
                        confidence: baseline.confidence,
                        scores: baseline.scores,
                    };
                }
                warn!(reply = raw.as_str(), "simplified reply matched no category");
            }
            Err(error) => warn!(%error, "simplified classifier call failed"),
        }

        baseline
    }

    /// One backend call, bounded by the configured timeout even if the
    /// backend ignores the limit it was handed.
    async fn invoke(
        &self,
        backend: &dyn ClassifierBackend,
        prompt: &str,
    ) -> Result<String, BackendError> {
        let limit = self.config.classifier_timeout;
        match tokio::time::timeout(limit, backend.invoke(prompt, limit)).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout(limit)),
        }
    }

    /// Classify many proposals in groups of `batch_size`, pausing between
    /// groups to respect downstream rate limits.
    ///
    /// Items within a group run concurrently but are isolated from each
    /// other: a backend failure degrades that item to its heuristic result
    /// and leaves its siblings untouched. Results come back in input order,
    /// one per input, and each item is cached as soon as it completes.
    pub async fn classify_batch(
        &self,
        inputs: &[ClassificationInput],
    ) -> Vec<ClassificationResult> {
        let mut results = Vec::with_capacity(inputs.len());
        for (group_index, group) in inputs.chunks(self.config.batch_size.max(1)).enumerate() {
            if group_index > 0 {
                tokio::time::sleep(self.config.batch_delay).await;
            }
            let futures = group.iter().map(|input| self.classify(input));
            results.extend(futures::future::join_all(futures).await);
        }
        results
    }

    /// Normalize a proposal's live status, serving from the TTL cache when a
    /// fresh entry exists for this project.
    pub fn status_with_cache(
        &self,
        project_id: &str,
        raw_description: &str,
        raw_code: Option<u32>,
    ) -> StatusResult {
        if let Some(hit) = self.statuses.get(project_id) {
            debug!(project_id, "status cache hit");
            return hit;
        }
        let result = normalize_status(raw_description, raw_code);
        self.statuses.insert(project_id.to_string(), result);
        result
    }

    /// Status refresh for a whole list, e.g. on a tracked-proposals poll.
    /// Purely local, so no grouping or pacing is needed; the TTL cache
    /// bounds staleness per project.
    pub fn batch_status(&self, items: &[(String, String, Option<u32>)]) -> Vec<StatusResult> {
        items
            .iter()
            .map(|(id, description, code)| self.status_with_cache(id, description, *code))
            .collect()
    }

    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            category_entries: self.categories.len(),
            status_entries: self.statuses.len(),
        }
    }

    pub fn clear_caches(&self) {
        self.categories.clear();
        self.statuses.clear();
    }
}
