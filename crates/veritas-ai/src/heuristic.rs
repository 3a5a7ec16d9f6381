//! Rule-based categorization over the pattern catalog.
//!
//! Pure and synchronous; the orchestrator layers caching and AI refinement
//! on top. Scoring rewards concentrated, high-weight matches: each
//! category's raw score is divided by its matched-pattern count, so many
//! weak hits do not outrank one strong phrase match.

use veritas_core::{Category, CategoryScores, ClassificationResult};

use crate::catalog::PatternCatalog;

/// Weight per primary keyword, capped per keyword regardless of occurrences.
pub const PRIMARY_WEIGHT: f32 = 0.4;
/// Weight per secondary keyword, capped per keyword.
pub const SECONDARY_WEIGHT: f32 = 0.2;
/// Flat weight per semantic term present.
pub const SEMANTIC_WEIGHT: f32 = 0.15;
/// Flat weight per context phrase present.
pub const CONTEXT_PHRASE_WEIGHT: f32 = 0.3;

/// Confidence reported when the input carries no text at all.
pub const EMPTY_INPUT_CONFIDENCE: f32 = 0.5;

/// Categorize a proposal from its summary text and keyword string.
///
/// Total over all inputs: empty text yields [`Category::DEFAULT`] at
/// confidence 0.5 with empty scores, and an input matching nothing yields
/// the default at confidence 0. Ties between categories resolve to the
/// catalog's iteration order.
pub fn classify_heuristically(
    catalog: &PatternCatalog,
    text: &str,
    keywords: &str,
) -> ClassificationResult {
    let full_text = format!("{keywords} {text}").to_lowercase();
    let full_text = full_text.trim();

    if full_text.is_empty() {
        return ClassificationResult {
            category: Category::DEFAULT,
            confidence: EMPTY_INPUT_CONFIDENCE,
            scores: CategoryScores::new(),
        };
    }

    let mut scores = CategoryScores::new();
    for (category, patterns) in catalog.iter() {
        scores.push(category, score_category(full_text, patterns));
    }

    let ranked = scores.ranked();
    let Some(&(top_category, top_score)) = ranked.first() else {
        return ClassificationResult {
            category: Category::DEFAULT,
            confidence: 0.0,
            scores,
        };
    };
    let second_score = ranked.get(1).map(|(_, s)| *s).unwrap_or(0.0);

    if top_score <= 0.0 {
        return ClassificationResult {
            category: Category::DEFAULT,
            confidence: 0.0,
            scores,
        };
    }

    // Empirically tuned: absolute strength plus separation margin, clamped.
    let confidence = ((top_score - second_score) + top_score).min(1.0);

    ClassificationResult {
        category: top_category,
        confidence,
        scores,
    }
}

/// Raw weighted score for one category, normalized by the number of distinct
/// matched patterns and clamped to [0, 1].
fn score_category(text: &str, patterns: &crate::catalog::PatternSet) -> f32 {
    let mut raw = 0.0f32;
    let mut matched = 0usize;

    for keyword in &patterns.primary {
        let occurrences = text.matches(keyword.as_str()).count();
        if occurrences > 0 {
            raw += (occurrences as f32 * PRIMARY_WEIGHT).min(PRIMARY_WEIGHT);
            matched += 1;
        }
    }
    for keyword in &patterns.secondary {
        let occurrences = text.matches(keyword.as_str()).count();
        if occurrences > 0 {
            raw += (occurrences as f32 * SECONDARY_WEIGHT).min(SECONDARY_WEIGHT);
            matched += 1;
        }
    }
    for term in &patterns.semantic {
        if text.contains(term.as_str()) {
            raw += SEMANTIC_WEIGHT;
            matched += 1;
        }
    }
    for phrase in &patterns.context_phrases {
        if text.contains(phrase.as_str()) {
            raw += CONTEXT_PHRASE_WEIGHT;
            matched += 1;
        }
    }

    (raw / matched.max(1) as f32).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PatternSet;

    fn catalog() -> PatternCatalog {
        PatternCatalog::default()
    }

    #[test]
    fn empty_text_yields_default_at_half_confidence() {
        for input in ["", "   ", "\t\n"] {
            let result = classify_heuristically(&catalog(), input, "");
            assert_eq!(result.category, Category::DEFAULT);
            assert_eq!(result.confidence, 0.5);
            assert!(result.scores.is_empty());
        }
    }

    #[test]
    fn single_primary_keyword_scores_at_most_primary_weight() {
        let result = classify_heuristically(&catalog(), "hospital", "");
        assert_eq!(result.category, Category::Health);
        let score = result.scores.get(Category::Health);
        assert!(score > 0.0 && score <= PRIMARY_WEIGHT, "score = {score}");
    }

    #[test]
    fn repeated_keyword_is_capped_per_keyword() {
        let once = classify_heuristically(&catalog(), "hospital", "");
        let thrice = classify_heuristically(&catalog(), "hospital hospital hospital", "");
        assert_eq!(
            once.scores.get(Category::Health),
            thrice.scores.get(Category::Health),
        );
    }

    #[test]
    fn marco_civil_classifies_as_technology() {
        let result = classify_heuristically(
            &catalog(),
            "Institui marco civil da internet e proteção de dados",
            "",
        );
        assert_eq!(result.category, Category::Technology);
        assert!(result.scores.get(Category::Technology) > 0.0);
    }

    #[test]
    fn keywords_participate_in_matching() {
        let result = classify_heuristically(&catalog(), "Dispõe sobre outras providências", "vacina sus");
        assert_eq!(result.category, Category::Health);
    }

    #[test]
    fn empty_catalog_yields_default_at_zero_confidence() {
        let empty = PatternCatalog::from_entries(vec![]);
        let result = classify_heuristically(&empty, "hospital", "");
        assert_eq!(result.category, Category::DEFAULT);
        assert_eq!(result.confidence, 0.0);
        assert!(result.scores.is_empty());
    }

    #[test]
    fn no_signal_yields_default_at_zero_confidence() {
        let result = classify_heuristically(&catalog(), "xyzzy qwerty plugh", "");
        assert_eq!(result.category, Category::DEFAULT);
        assert_eq!(result.confidence, 0.0);
        assert!(!result.scores.is_empty());
    }

    #[test]
    fn context_phrase_match_does_not_decrease_top_score() {
        // Base matches one semantic term (0.15); adding the phrase averages
        // in a heavier 0.3 weight, so the normalized score can only go up.
        let base = classify_heuristically(&catalog(), "conectividade", "");
        assert_eq!(base.category, Category::Technology);

        let with_phrase = classify_heuristically(&catalog(), "conectividade marco civil", "");
        assert_eq!(with_phrase.category, Category::Technology);
        assert!(
            with_phrase.scores.get(Category::Technology)
                >= base.scores.get(Category::Technology)
        );
    }

    #[test]
    fn confidence_is_clamped_to_one() {
        // A lone strong match: top = 0.4, second = 0 → confidence 0.8.
        let result = classify_heuristically(&catalog(), "hospital", "");
        assert!(result.confidence <= 1.0);
        assert!((result.confidence - 0.8).abs() < 1e-6);
    }

    #[test]
    fn ties_resolve_to_catalog_order() {
        let small = PatternCatalog::from_entries(vec![
            (Category::Education, PatternSet::new(&["alfa"], &[], &[], &[])),
            (Category::Security, PatternSet::new(&["beta"], &[], &[], &[])),
        ]);
        // Both categories match one primary keyword once: identical scores.
        let result = classify_heuristically(&small, "alfa beta", "");
        assert_eq!(result.category, Category::Education);
    }

    #[test]
    fn normalization_rewards_concentration() {
        let small = PatternCatalog::from_entries(vec![
            (
                Category::Health,
                PatternSet::new(&[], &[], &[], &["frase muito forte"]),
            ),
            (
                Category::Economy,
                PatternSet::new(&[], &[], &["um", "dois", "tres", "quatro"], &[]),
            ),
        ]);
        // Health: one phrase → 0.3/1. Economy: four semantic hits → 0.6/4 = 0.15.
        let result = classify_heuristically(&small, "frase muito forte um dois tres quatro", "");
        assert_eq!(result.category, Category::Health);
    }
}
