//! Core types and shared configuration for the Veritas classification pipeline.

pub mod category;
pub mod config;
pub mod status;
pub mod types;

pub use category::{Category, ParseCategoryError};
pub use config::PipelineConfig;
pub use status::LifecycleStatus;
pub use types::{
    CategoryScores, ClassificationInput, ClassificationResult, FullContext, StatusResult,
};
