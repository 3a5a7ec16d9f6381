//! Classification and status-normalization pipeline for legislative proposals.
//!
//! The heuristic categorizer always runs; when its confidence falls below the
//! configured threshold the orchestrator consults an external classifier
//! through the [`ClassifierBackend`] capability, degrading gracefully back to
//! the heuristic result when the backend is absent, slow, or incoherent.

pub mod backend;
pub mod catalog;
pub mod heuristic;
pub mod orchestrator;
pub mod prompt;
pub mod status;

pub use backend::{BackendError, ClassifierBackend};
#[cfg(feature = "http")]
pub use backend::HttpClassifier;
pub use catalog::{PatternCatalog, PatternSet};
pub use heuristic::classify_heuristically;
pub use orchestrator::{Pipeline, PipelineStats};
pub use status::normalize_status;
