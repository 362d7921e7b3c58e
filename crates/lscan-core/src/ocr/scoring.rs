//! Heuristic quality score for label transcriptions.

use crate::label::rules::patterns::{BATCH_NATIVE, DATE_PATTERN, LABEL_KEYWORDS};

/// Score how useful a transcription is for label extraction.
///
/// Dates and batch numbers weigh most, label keywords add a little, and
/// very short output is penalized. Higher is better.
pub fn score_transcription(text: &str) -> f32 {
    if text.is_empty() {
        return 0.0;
    }

    let mut score = 0.0f32;

    score += DATE_PATTERN.find_iter(text).count() as f32 * 10.0;
    score += BATCH_NATIVE.find_iter(text).count() as f32 * 15.0;

    let upper = text.to_ascii_uppercase();
    score += LABEL_KEYWORDS.iter().filter(|kw| upper.contains(*kw)).count() as f32 * 5.0;

    let len = text.chars().count() as f32;
    if len < 50.0 {
        score -= 20.0;
    }
    score += (len / 10.0).min(20.0);

    score
}
