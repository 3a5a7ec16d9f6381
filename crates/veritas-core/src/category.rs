//! Closed topical category enumeration for legislative proposals.
//!
//! The set is fixed at compile time and never extended at runtime. Scoring
//! ties and prompt validation both iterate in declaration order, so that
//! order is part of the contract.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Topical category of a legislative proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Health,
    Education,
    Security,
    Labor,
    Environment,
    Technology,
    HumanRights,
    Economy,
    /// Catch-all bucket with no keyword patterns. Never produced by scoring
    /// or by model replies; exists for records classified out of band.
    Other,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0:?}")]
pub struct ParseCategoryError(pub String);

impl Category {
    /// Every category, in declaration order. Score ties resolve to the
    /// earliest entry here.
    pub const ALL: [Category; 9] = [
        Category::Health,
        Category::Education,
        Category::Security,
        Category::Labor,
        Category::Environment,
        Category::Technology,
        Category::HumanRights,
        Category::Economy,
        Category::Other,
    ];

    /// Categories a classifier model may answer with. Excludes [`Category::Other`].
    pub const PROMPTABLE: [Category; 8] = [
        Category::Health,
        Category::Education,
        Category::Security,
        Category::Labor,
        Category::Environment,
        Category::Technology,
        Category::HumanRights,
        Category::Economy,
    ];

    /// Fallback for empty input or an all-zero score set. Most legislative
    /// text with no topical signal is fiscal or regulatory boilerplate.
    pub const DEFAULT: Category = Category::Economy;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Security => "Security",
            Self::Labor => "Labor",
            Self::Environment => "Environment",
            Self::Technology => "Technology",
            Self::HumanRights => "Human Rights",
            Self::Economy => "Economy",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive exact match against the promptable labels.
    ///
    /// Used for structured model replies, where partial matching would
    /// invite false positives.
    pub fn parse_exact(text: &str) -> Option<Category> {
        let wanted = text.trim().to_lowercase();
        Self::PROMPTABLE
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == wanted)
    }

    /// Lenient match for free-form model replies: exact first, then
    /// substring containment in either direction.
    pub fn parse_loose(text: &str) -> Option<Category> {
        if let Some(cat) = Self::parse_exact(text) {
            return Some(cat);
        }
        let wanted = text.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        Self::PROMPTABLE.into_iter().find(|c| {
            let label = c.as_str().to_lowercase();
            label.contains(&wanted) || wanted.contains(&label)
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == wanted)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
