//! Date scanning for label text.

use tracing::trace;

use super::patterns::DATE_PATTERN;
use super::FieldExtractor;
use crate::models::label::LabelDate;

/// A date-shaped substring found in a transcription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCandidate {
    /// Text as matched.
    pub raw_match: String,
    /// Normalized day/month/year.
    pub normalized: LabelDate,
    /// Byte offset of the match in the original-case text.
    pub offset: usize,
}

/// Date field extractor.
pub struct DateScanner {
    strict: bool,
}

impl DateScanner {
    /// Create a scanner that only keeps real calendar dates.
    pub fn new() -> Self {
        Self { strict: true }
    }

    /// Keep or drop candidates whose day/month are out of range.
    pub fn with_strict_dates(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl Default for DateScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateScanner {
    type Output = DateCandidate;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = find_all_dates(text);
        if self.strict {
            results.retain(|c| {
                let keep = c.normalized.is_calendar_date();
                if !keep {
                    trace!("Dropping out-of-range date {:?}", c.raw_match);
                }
                keep
            });
        }
        results
    }
}

/// Find every date-shaped substring, in text order, duplicates included.
///
/// No range checking is done here; `31/14/25` is returned as-is.
pub fn find_all_dates(text: &str) -> Vec<DateCandidate> {
    DATE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let full_match = caps.get(0)?;
            let normalized = LabelDate::from_groups(&caps[1], &caps[2], &caps[3])?;
            Some(DateCandidate {
                raw_match: full_match.as_str().to_string(),
                normalized,
                offset: full_match.start(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_short_date() {
        let dates = find_all_dates("1/2/23");
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].normalized, LabelDate::from_parts(1, 2, 2023));
        assert_eq!(dates[0].normalized.to_string(), "01/02/2023");
        assert_eq!(dates[0].raw_match, "1/2/23");
    }

    #[test]
    fn test_normalize_full_date() {
        let dates = find_all_dates("14/07/2025");
        assert_eq!(dates[0].normalized.to_string(), "14/07/2025");
    }

    #[test]
    fn test_offsets_and_duplicates() {
        let text = "MFG 14.07.25 EXP 14.07.25";
        let dates = find_all_dates(text);
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0].offset, 4);
        assert_eq!(dates[1].offset, 17);
        assert_eq!(dates[0].normalized, dates[1].normalized);
    }

    #[test]
    fn test_mixed_separators() {
        let dates = find_all_dates("12-04/26");
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].normalized, LabelDate::from_parts(12, 4, 2026));
    }

    #[test]
    fn test_missing_separator_not_matched() {
        assert!(find_all_dates("1407 25").is_empty());
        assert!(find_all_dates("14/0725").is_empty());
    }

    #[test]
    fn test_batch_number_is_not_a_date() {
        assert!(find_all_dates("25-8902-0014").is_empty());
    }

    #[test]
    fn test_strict_scanner_drops_impossible_dates() {
        let text = "31/14/25 then 12/04/26";
        assert_eq!(find_all_dates(text).len(), 2);

        let strict = DateScanner::new().extract_all(text);
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].raw_match, "12/04/26");

        let lenient = DateScanner::new().with_strict_dates(false).extract_all(text);
        assert_eq!(lenient.len(), 2);
        assert_eq!(lenient[0].normalized, LabelDate::from_parts(31, 14, 2025));
    }
}
