//! Prompt construction and model-reply parsing.
//!
//! Two prompt shapes: a full-context prompt that asks for a structured JSON
//! object, and a simplified fallback that asks for a bare category name.
//! Parsing is forgiving about everything except the category itself; an
//! off-enumeration category always fails the parse.

use serde::Deserialize;
use veritas_core::{Category, ClassificationInput, FullContext};

use crate::catalog::PatternCatalog;

/// Hints included per category in the full-context prompt.
const HINTS_PER_CATEGORY: usize = 12;

/// Validated payload of a structured model reply.
#[derive(Debug, PartialEq)]
pub struct StructuredReply {
    pub category: Category,
    /// Model-reported confidence, clamped to [0, 1].
    pub confidence: f32,
}

#[derive(Deserialize)]
struct RawReply {
    category: String,
    #[serde(default)]
    confidence: f32,
}

/// Full-context prompt: all known fields plus condensed catalog hints, with
/// the model instructed to answer in strict JSON.
pub fn full_context_prompt(
    catalog: &PatternCatalog,
    input: &ClassificationInput,
    context: &FullContext,
) -> String {
    let authors = if context.author_names.is_empty() {
        "N/A".to_string()
    } else {
        context.author_names.join(", ")
    };
    let keywords = if input.keywords.is_empty() {
        "N/A"
    } else {
        &input.keywords
    };
    let stage = if context.current_stage.is_empty() {
        "N/A"
    } else {
        &context.current_stage
    };
    let categories = Category::PROMPTABLE
        .map(|c| c.as_str())
        .join(", ");

    format!(
        "You are an expert classifier of Brazilian legislative proposals.\n\
         \n\
         Analyse the full proposal below, using both semantic analysis and the\n\
         keyword hints, and decide the single most appropriate category.\n\
         \n\
         Reply with ONLY a JSON object of the form:\n\
         {{\"category\": \"<one of the categories>\", \"confidence\": <0 to 1>,\n\
          \"matchedKeywords\": [\"...\"], \"explanation\": \"<short reason>\"}}\n\
         \n\
         If unsure, give your best guess with a low confidence (e.g. 0.3).\n\
         \n\
         Valid categories: {categories}\n\
         \n\
         Key terms per category (use to reinforce your decision):\n\
         {hints}\n\
         \n\
         ----\n\
         Title: {title}\n\
         Number: {number}\n\
         Authors: {authors}\n\
         Current stage: {stage}\n\
         Keywords: {keywords}\n\
         \n\
         Summary:\n\
         {summary}\n\
         \n\
         Detailed description:\n\
         {description}\n\
         \n\
         Reply with ONLY the JSON object described above.",
        hints = catalog.prompt_hints(HINTS_PER_CATEGORY).join("\n"),
        title = context.title,
        number = context.number,
        summary = input.text,
        description = context.detailed_description,
    )
}

/// Simplified fallback prompt: summary and keywords only, bare-name answer.
pub fn simple_prompt(text: &str, keywords: &str) -> String {
    let categories = Category::PROMPTABLE
        .map(|c| c.as_str())
        .join(", ");
    format!(
        "Classify the following Brazilian legislative proposal into exactly\n\
         one of these categories: {categories}.\n\
         \n\
         Keywords: {keywords}\n\
         Summary: \"{text}\"\n\
         \n\
         Answer with ONLY the category name, nothing else.",
    )
}

/// Parse a structured reply: extract the outermost `{...}` span, parse it as
/// JSON (with a single repair attempt), and validate the category by exact
/// case-insensitive match. Partial category matches are rejected at this
/// stage; only the bare-name fallback parses loosely.
pub fn parse_structured_reply(raw: &str) -> Option<StructuredReply> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    let span = &raw[start..=end];

    let parsed: RawReply = serde_json::from_str(span)
        .or_else(|_| serde_json::from_str(&repair_json(span)))
        .ok()?;

    let category = Category::parse_exact(&parsed.category)?;
    Some(StructuredReply {
        category,
        confidence: parsed.confidence.clamp(0.0, 1.0),
    })
}

/// Common model slip-ups: single-quoted strings and raw newlines inside the
/// object. Good enough for a second parse attempt; anything worse fails.
fn repair_json(span: &str) -> String {
    span.replace('\n', " ").replace('\'', "\"")
}

/// Parse a bare-category reply: first line only, letters and spaces kept,
/// then exact match followed by substring match in either direction.
pub fn parse_bare_category(raw: &str) -> Option<Category> {
    let line = raw.trim().lines().next()?;
    let cleaned: String = line
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();
    Category::parse_loose(cleaned.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritas_core::ClassificationInput;

    fn context() -> FullContext {
        FullContext {
            title: "Marco Civil da Internet".into(),
            number: "PL 2126/2011".into(),
            detailed_description: "Estabelece princípios para o uso da internet no Brasil.".into(),
            author_names: vec!["Dep. Alessandro Molon".into()],
            current_stage: "Plenário".into(),
        }
    }

    #[test]
    fn full_context_prompt_carries_all_fields() {
        let catalog = PatternCatalog::default();
        let input = ClassificationInput::new("Institui o marco civil", "internet");
        let prompt = full_context_prompt(&catalog, &input, &context());

        assert!(prompt.contains("Marco Civil da Internet"));
        assert!(prompt.contains("PL 2126/2011"));
        assert!(prompt.contains("Dep. Alessandro Molon"));
        assert!(prompt.contains("Plenário"));
        assert!(prompt.contains("Institui o marco civil"));
        // Catalog hints appear, category labels appear, Other does not.
        assert!(prompt.contains("Technology: "));
        assert!(prompt.contains("Human Rights"));
        assert!(!prompt.contains("Other"));
    }

    #[test]
    fn full_context_prompt_substitutes_missing_fields() {
        let catalog = PatternCatalog::default();
        let input = ClassificationInput::new("texto", "");
        let prompt = full_context_prompt(&catalog, &input, &FullContext::default());
        assert!(prompt.contains("Authors: N/A"));
        assert!(prompt.contains("Keywords: N/A"));
        assert!(prompt.contains("Current stage: N/A"));
    }

    #[test]
    fn structured_reply_with_surrounding_prose() {
        let raw = r#"Sure! Here is the classification:
            {"category": "Technology", "confidence": 0.9,
             "matchedKeywords": ["internet"], "explanation": "marco civil"}
            Hope this helps."#;
        let reply = parse_structured_reply(raw).unwrap();
        assert_eq!(reply.category, Category::Technology);
        assert_eq!(reply.confidence, 0.9);
    }

    #[test]
    fn structured_reply_category_is_case_insensitive_but_exact() {
        let reply = parse_structured_reply(r#"{"category": "health"}"#).unwrap();
        assert_eq!(reply.category, Category::Health);
        assert_eq!(reply.confidence, 0.0);

        // Partial names are rejected at the structured stage.
        assert!(parse_structured_reply(r#"{"category": "Tech"}"#).is_none());
        assert!(parse_structured_reply(r#"{"category": "Sports"}"#).is_none());
    }

    #[test]
    fn structured_reply_repairs_single_quotes() {
        let raw = "{'category': 'Education', 'confidence': 0.6}";
        let reply = parse_structured_reply(raw).unwrap();
        assert_eq!(reply.category, Category::Education);
        assert!((reply.confidence - 0.6).abs() < 1e-6);
    }

    #[test]
    fn structured_reply_clamps_confidence() {
        let reply = parse_structured_reply(r#"{"category": "Economy", "confidence": 3.0}"#).unwrap();
        assert_eq!(reply.confidence, 1.0);
    }

    #[test]
    fn structured_reply_rejects_garbage() {
        assert!(parse_structured_reply("no json here").is_none());
        assert!(parse_structured_reply("{broken").is_none());
        assert!(parse_structured_reply("}{").is_none());
        assert!(parse_structured_reply("").is_none());
    }

    #[test]
    fn bare_category_first_line_with_punctuation() {
        assert_eq!(parse_bare_category("Health.\nBecause..."), Some(Category::Health));
        assert_eq!(parse_bare_category("**Education**"), Some(Category::Education));
    }

    #[test]
    fn bare_category_substring_both_directions() {
        assert_eq!(parse_bare_category("Tech"), Some(Category::Technology));
        assert_eq!(
            parse_bare_category("the Technology category fits best"),
            Some(Category::Technology)
        );
    }

    #[test]
    fn bare_category_rejects_unmatchable_replies() {
        assert_eq!(parse_bare_category(""), None);
        assert_eq!(parse_bare_category("42"), None);
        assert_eq!(parse_bare_category("I cannot classify this"), None);
    }
}
