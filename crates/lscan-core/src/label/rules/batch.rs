//! Batch / lot number extraction.

use regex::Regex;
use tracing::debug;

use super::patterns::{is_date_shaped, BATCH_LABELED, BATCH_NATIVE, BATCH_SHORT, LOT_NUMBER};
use super::FieldExtractor;

/// Batch number extractor.
pub struct BatchExtractor;

impl BatchExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BatchExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for BatchExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        find_batch(text)
    }

    /// Every accepted candidate, in the order `extract` would consider them.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<String> = Vec::new();
        for candidate in candidates(text) {
            if !results.contains(&candidate) {
                results.push(candidate);
            }
        }
        results
    }
}

fn batch_patterns() -> [&'static Regex; 4] {
    [&*BATCH_NATIVE, &*BATCH_LABELED, &*BATCH_SHORT, &*LOT_NUMBER]
}

/// First match of each pattern, original text first, then uppercased,
/// with date-shaped values rejected.
fn candidates(text: &str) -> impl Iterator<Item = String> {
    let upper = text.to_ascii_uppercase();
    let passes = [text.to_string(), upper];

    passes.into_iter().flat_map(|pass| {
        batch_patterns()
            .into_iter()
            .filter_map(|pattern| {
                let caps = pattern.captures(&pass)?;
                let value = caps.get(1)?.as_str().trim();
                if value.is_empty() {
                    return None;
                }
                if is_date_shaped(value) {
                    debug!("Rejecting date-shaped batch candidate {:?}", value);
                    return None;
                }
                Some(value.to_string())
            })
            .collect::<Vec<_>>()
    })
}

/// Extract the batch number from label text.
pub fn find_batch(text: &str) -> Option<String> {
    let batch = candidates(text).next();
    if let Some(ref value) = batch {
        debug!("Batch matched: {}", value);
    }
    batch
}
