//! Label data models: normalized dates, confidence annotations and the
//! record produced by the label parser.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::label::rules::patterns::DATE_EXACT;

/// A label date normalized to day, month and four-digit year.
///
/// Ordering is chronological (year, then month, then day). Values read from
/// OCR text in lenient mode may not be real calendar dates; see
/// [`LabelDate::is_calendar_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LabelDate {
    year: u16,
    month: u8,
    day: u8,
}

impl LabelDate {
    /// Build a date from already-normalized parts.
    pub fn from_parts(day: u8, month: u8, year: u16) -> Self {
        Self { year, month, day }
    }

    /// Normalize the three digit groups of a date-shaped match.
    ///
    /// Two-digit years are expanded by prefixing `20`.
    pub fn from_groups(day: &str, month: &str, year: &str) -> Option<Self> {
        let day: u8 = day.parse().ok()?;
        let month: u8 = month.parse().ok()?;
        let year: u16 = match year.len() {
            2 => 2000 + year.parse::<u16>().ok()?,
            4 => year.parse().ok()?,
            _ => return None,
        };
        Some(Self::from_parts(day, month, year))
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// Convert to a calendar date, if the day and month are in range.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(i32::from(self.year), u32::from(self.month), u32::from(self.day))
    }

    /// Whether the triple names a real calendar day.
    pub fn is_calendar_date(&self) -> bool {
        self.to_naive_date().is_some()
    }

    /// Format as `YYYY-MM-DD` (the ERP import format).
    pub fn to_iso_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for LabelDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

impl FromStr for LabelDate {
    type Err = ExtractionError;

    /// Parse any date-shaped string (`1/2/23`, `14.07.2025`, `01-02-2023`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || ExtractionError::Parse {
            field: "date".to_string(),
            value: s.to_string(),
        };

        let caps = DATE_EXACT.captures(s.trim()).ok_or_else(parse_err)?;
        Self::from_groups(&caps[1], &caps[2], &caps[3]).ok_or_else(parse_err)
    }
}

impl TryFrom<String> for LabelDate {
    type Error = ExtractionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LabelDate> for String {
    fn from(date: LabelDate) -> Self {
        date.to_string()
    }
}

/// Coarse trust annotation attached to an extracted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Field absent. Older exports write this as an empty string.
    #[default]
    #[serde(alias = "")]
    Unset,
    /// Field extracted without any repair.
    High,
    /// Extraction was ambiguous.
    Low,
    /// Field was exchanged with its counterpart date.
    Swapped,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::High => "high",
            Self::Low => "low",
            Self::Swapped => "swapped",
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence for each scored field. All slots are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfidence {
    pub batch_number: Confidence,
    pub manufacturing_date: Confidence,
    pub expiry_date: Confidence,
}

/// Structured fields recovered from one label transcription.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedRecord {
    /// Batch or lot identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,

    /// Manufacturing (packing) date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturing_date: Option<LabelDate>,

    /// Expiry (best before / use by) date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<LabelDate>,

    /// Product name, title-cased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavour: Option<String>,

    /// Per-field confidence, assigned by the validator.
    pub confidence: FieldConfidence,
}

impl ExtractedRecord {
    /// True when no field was recovered.
    pub fn is_empty(&self) -> bool {
        self.batch_number.is_none()
            && self.manufacturing_date.is_none()
            && self.expiry_date.is_none()
            && self.flavour.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_date() {
        let date: LabelDate = "1/2/23".parse().unwrap();
        assert_eq!(date.day(), 1);
        assert_eq!(date.month(), 2);
        assert_eq!(date.year(), 2023);
        assert_eq!(date.to_string(), "01/02/2023");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("14/07".parse::<LabelDate>().is_err());
        assert!("batch 14/07/25".parse::<LabelDate>().is_err());
        assert!("1/2/234".parse::<LabelDate>().is_err());
    }

    #[test]
    fn test_chronological_order() {
        let earlier = LabelDate::from_parts(31, 12, 2025);
        let later = LabelDate::from_parts(1, 1, 2026);
        assert!(earlier < later);
        assert!(LabelDate::from_parts(2, 3, 2025) > LabelDate::from_parts(30, 2, 2025));
    }

    #[test]
    fn test_calendar_check() {
        assert!(LabelDate::from_parts(29, 2, 2024).is_calendar_date());
        assert!(!LabelDate::from_parts(31, 14, 2025).is_calendar_date());
    }

    #[test]
    fn test_iso_string() {
        assert_eq!(LabelDate::from_parts(14, 7, 2025).to_iso_string(), "2025-07-14");
    }

    #[test]
    fn test_serde_uses_display_form() {
        let record = ExtractedRecord {
            manufacturing_date: Some(LabelDate::from_parts(14, 7, 2025)),
            confidence: FieldConfidence {
                manufacturing_date: Confidence::High,
                ..Default::default()
            },
            ..Default::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["manufacturing_date"], "14/07/2025");
        assert_eq!(json["confidence"]["manufacturing_date"], "high");
        assert_eq!(json["confidence"]["batch_number"], "unset");
        assert!(json.get("batch_number").is_none());

        let back: ExtractedRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_confidence_display_matches_serde() {
        for c in [Confidence::Unset, Confidence::High, Confidence::Low, Confidence::Swapped] {
            assert_eq!(serde_json::to_value(c).unwrap(), c.to_string());
        }
        assert_eq!(Confidence::Unset.as_str(), "unset");
    }

    #[test]
    fn test_empty_confidence_reads_as_unset() {
        let confidence: FieldConfidence =
            serde_json::from_str(r#"{"batch_number": "", "expiry_date": "high"}"#).unwrap();
        assert_eq!(confidence.batch_number, Confidence::Unset);
        assert_eq!(confidence.expiry_date, Confidence::High);
    }
}
