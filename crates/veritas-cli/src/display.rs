//! Human-readable rendering of classification and status results.

use veritas_core::{ClassificationInput, ClassificationResult, StatusResult};

const BAR_WIDTH: usize = 20;

/// Card view of a single classification: category, confidence bar, and the
/// top non-zero diagnostic scores.
pub fn print_classification(result: &ClassificationResult) {
    println!("Category:   {}", result.category);
    println!(
        "Confidence: {:>5.1}%  {}",
        result.confidence * 100.0,
        bar(result.confidence)
    );
    let explanation = result.scores.explanation();
    if !explanation.is_empty() {
        println!("Signals:    {explanation}");
    }
}

pub fn print_status(result: &StatusResult) {
    println!("Status:   {}", result.status);
    println!(
        "Progress: {:>3}%  {}",
        result.progress_percent,
        bar(result.progress_percent as f32 / 100.0)
    );
}

/// One line per batch item: truncated summary, category, confidence.
pub fn print_batch_line(input: &ClassificationInput, result: &ClassificationResult) {
    let summary: String = input.text.chars().take(60).collect();
    let ellipsis = if input.text.chars().count() > 60 { "…" } else { "" };
    println!(
        "{:<14} {:>5.1}%  {summary}{ellipsis}",
        result.category.to_string(),
        result.confidence * 100.0,
    );
}

fn bar(fraction: f32) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
