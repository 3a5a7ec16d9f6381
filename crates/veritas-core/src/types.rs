//! Request and result types flowing through the classification pipeline.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::status::LifecycleStatus;

/// Everything known about a proposal beyond its summary text. Present only
/// when the caller fetched the full record; enables the full-context
/// classifier prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FullContext {
    pub title: String,
    pub number: String,
    pub detailed_description: String,
    pub author_names: Vec<String>,
    pub current_stage: String,
}

/// One classification request: the official summary ("ementa"), the feed's
/// keyword string, and optional full context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationInput {
    pub text: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub full_context: Option<FullContext>,
}

impl ClassificationInput {
    pub fn new(text: impl Into<String>, keywords: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keywords: keywords.into(),
            full_context: None,
        }
    }

    pub fn with_context(mut self, context: FullContext) -> Self {
        self.full_context = Some(context);
        self
    }
}

/// Per-category normalized scores in [0, 1], kept in [`Category::ALL`]
/// declaration order. Diagnostic payload; not consulted after the winning
/// category is picked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    scores: Vec<(Category, f32)>,
}

impl CategoryScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a category's normalized score. Call in declaration order so
    /// `ranked` ties resolve deterministically.
    pub fn push(&mut self, category: Category, score: f32) {
        self.scores.push((category, score));
    }

    pub fn get(&self, category: Category) -> f32 {
        self.scores
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, s)| *s)
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Scores sorted descending. The sort is stable, so equal scores keep
    /// declaration order.
    pub fn ranked(&self) -> Vec<(Category, f32)> {
        let mut ranked = self.scores.clone();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }

    /// Short human-readable summary of the top non-zero scores, e.g.
    /// `"Health (45%), Technology (30%)"`. Empty string when nothing scored.
    pub fn explanation(&self) -> String {
        self.ranked()
            .into_iter()
            .filter(|(_, s)| *s > 0.0)
            .take(3)
            .map(|(c, s)| format!("{} ({:.0}%)", c, s * 100.0))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Outcome of classifying one proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    /// Combined strength-and-margin score in [0, 1]; above the configured
    /// threshold the external classifier is never consulted.
    pub confidence: f32,
    pub scores: CategoryScores,
}

/// Outcome of normalizing a proposal's raw status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResult {
    pub status: LifecycleStatus,
    /// Coarse progress estimate derived from the status alone: terminal 100,
    /// under vote 75, under review 40, otherwise 20.
    pub progress_percent: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_ranked_descending_stable() {
        let mut scores = CategoryScores::new();
        scores.push(Category::Health, 0.2);
        scores.push(Category::Education, 0.5);
        scores.push(Category::Security, 0.5);
        scores.push(Category::Economy, 0.1);

        let ranked = scores.ranked();
        assert_eq!(ranked[0].0, Category::Education);
        // Equal scores keep declaration order: Education before Security.
        assert_eq!(ranked[1].0, Category::Security);
        assert_eq!(ranked[3].0, Category::Economy);
    }

    #[test]
    fn explanation_lists_top_three_nonzero() {
        let mut scores = CategoryScores::new();
        scores.push(Category::Health, 0.45);
        scores.push(Category::Technology, 0.3);
        scores.push(Category::Economy, 0.0);

        assert_eq!(scores.explanation(), "Health (45%), Technology (30%)");
    }

    #[test]
    fn explanation_empty_when_no_scores() {
        assert_eq!(CategoryScores::new().explanation(), "");
    }

    #[test]
    fn get_missing_category_is_zero() {
        let scores = CategoryScores::new();
        assert_eq!(scores.get(Category::Health), 0.0);
    }

    #[test]
    fn input_json_shape() {
        let json = r#"{"text": "Institui o marco civil da internet"}"#;
        let input: ClassificationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.keywords, "");
        assert!(input.full_context.is_none());
    }

    #[test]
    fn result_json_roundtrip() {
        let mut scores = CategoryScores::new();
        scores.push(Category::Technology, 0.4);
        let result = ClassificationResult {
            category: Category::Technology,
            confidence: 0.8,
            scores,
        };
        let json = serde_json::to_string(&result).unwrap();
        let parsed: ClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
