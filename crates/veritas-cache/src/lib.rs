//! In-memory result caches: bounded category cache, TTL-bounded status cache.
//!
//! Both caches are plain values owned by the pipeline, one instance per
//! process. Writes are idempotent; concurrent readers never block writers.

mod category;
mod key;
mod status;

pub use category::CategoryCache;
pub use key::classification_key;
pub use status::StatusCache;
