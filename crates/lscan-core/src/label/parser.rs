//! Label parser: raw OCR text in, structured record out.

use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::label::ExtractedRecord;

use super::rules::{
    find_batch, resolve_date_roles, DateScanner, FieldExtractor, FlavourExtractor,
};
use super::validate::validate;

/// Trait for label parsing.
pub trait LabelExtractor {
    /// Parse a label transcription. Never fails; missing fields are absent.
    fn parse(&self, text: &str) -> ExtractedRecord;
}

/// Rule-based label parser.
pub struct LabelParser {
    dates: DateScanner,
    flavours: FlavourExtractor,
}

impl LabelParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    /// Create a parser from extraction configuration.
    pub fn with_config(config: &ExtractionConfig) -> Self {
        Self {
            dates: DateScanner::new().with_strict_dates(config.strict_dates),
            flavours: FlavourExtractor::new().with_extra_flavours(&config.extra_flavours),
        }
    }

    /// Keep or drop date candidates that are not real calendar days.
    pub fn with_strict_dates(mut self, strict: bool) -> Self {
        self.dates = DateScanner::new().with_strict_dates(strict);
        self
    }

    /// Append product names to the flavour vocabulary.
    pub fn with_extra_flavours<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.flavours = std::mem::take(&mut self.flavours).with_extra_flavours(names);
        self
    }
}

impl Default for LabelParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelExtractor for LabelParser {
    fn parse(&self, text: &str) -> ExtractedRecord {
        info!("Parsing label from {} characters of text", text.len());

        let upper = text.to_ascii_uppercase();

        let dates = self.dates.extract_all(text);
        debug!("Found {} date candidates", dates.len());

        let roles = resolve_date_roles(text, &dates);

        let record = ExtractedRecord {
            batch_number: find_batch(text),
            manufacturing_date: roles.manufacturing,
            expiry_date: roles.expiry,
            flavour: self.flavours.extract(&upper),
            ..Default::default()
        };
        debug!("Extracted before validation: {:?}", record);

        let record = validate(record);
        debug!(
            "Label parsed: batch={:?} mfg={:?} exp={:?} flavour={:?}",
            record.batch_number, record.manufacturing_date, record.expiry_date, record.flavour
        );

        record
    }
}

/// Parse a label transcription with default settings.
pub fn parse_label(text: &str) -> ExtractedRecord {
    LabelParser::new().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::label::{Confidence, FieldConfidence, LabelDate};
    use pretty_assertions::assert_eq;

    const SCENARIO: &str = "MANUFACTURE DATE\nEXPIRY DATE\n14/07/25\n12/04/26 25-8902-0014 PEPSI";

    #[test]
    fn test_parse_reference_label() {
        let record = parse_label(SCENARIO);

        assert_eq!(
            record,
            ExtractedRecord {
                batch_number: Some("25-8902-0014".to_string()),
                manufacturing_date: Some(LabelDate::from_parts(14, 7, 2025)),
                expiry_date: Some(LabelDate::from_parts(12, 4, 2026)),
                flavour: Some("Pepsi".to_string()),
                confidence: FieldConfidence {
                    batch_number: Confidence::High,
                    manufacturing_date: Confidence::High,
                    expiry_date: Confidence::High,
                },
            }
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = LabelParser::new();
        for text in [SCENARIO, "", "BB 01/02/27 LOT XZ9921", "garbage \u{fffd} 3/3/3"] {
            assert_eq!(parser.parse(text), parser.parse(text));
        }
    }

    #[test]
    fn test_parse_empty() {
        let record = parse_label("");
        assert!(record.is_empty());
        assert_eq!(record.confidence, FieldConfidence::default());
    }

    #[test]
    fn test_reversed_dates_swapped() {
        let record = parse_label("MFG DATE 12/04/26 EXP DATE 14/07/25");
        assert_eq!(record.manufacturing_date, Some(LabelDate::from_parts(14, 7, 2025)));
        assert_eq!(record.expiry_date, Some(LabelDate::from_parts(12, 4, 2026)));
        assert_eq!(record.confidence.manufacturing_date, Confidence::Swapped);
        assert_eq!(record.confidence.expiry_date, Confidence::Swapped);
    }

    #[test]
    fn test_batch_never_date_shaped() {
        let texts = [
            "B NO 12-04-2026 MFD 01.01.25",
            "BATCH NO 01-02-2025 EXP 01-02-2026",
            "LOT 1.2.2023",
            SCENARIO,
        ];
        for text in texts {
            let record = parse_label(text);
            if let Some(batch) = &record.batch_number {
                assert!(!crate::label::rules::is_date_shaped(batch), "{batch} from {text:?}");
            }
        }
    }

    #[test]
    fn test_single_expiry_date() {
        let record = parse_label("Best Before: 31.12.2026\nMIRINDA ORANGE");
        assert_eq!(record.manufacturing_date, None);
        assert_eq!(record.expiry_date, Some(LabelDate::from_parts(31, 12, 2026)));
        assert_eq!(record.flavour, Some("Mirinda".to_string()));
        assert_eq!(record.confidence.manufacturing_date, Confidence::Unset);
        assert_eq!(record.confidence.expiry_date, Confidence::High);
    }

    #[test]
    fn test_lenient_dates_keep_out_of_range_values() {
        let text = "31/14/25 12/04/26";

        let strict = LabelParser::new().parse(text);
        assert_eq!(strict.manufacturing_date, Some(LabelDate::from_parts(12, 4, 2026)));
        assert_eq!(strict.expiry_date, None);

        let lenient = LabelParser::new().with_strict_dates(false).parse(text);
        assert_eq!(lenient.manufacturing_date, Some(LabelDate::from_parts(31, 14, 2025)));
        assert_eq!(lenient.expiry_date, Some(LabelDate::from_parts(12, 4, 2026)));
    }

    #[test]
    fn test_configured_flavours() {
        let config = ExtractionConfig {
            extra_flavours: vec!["Nimbooz".to_string()],
            ..Default::default()
        };
        let record = LabelParser::with_config(&config).parse("nimbooz masala 250 ml");
        assert_eq!(record.flavour, Some("Nimbooz".to_string()));
    }

    #[test]
    fn test_non_ascii_noise_before_keywords() {
        let record = parse_label("ΐΐΐΐΐ 01/01/20 MFD 14/07/25 12/04/26 pepsi");
        assert_eq!(record.manufacturing_date, Some(LabelDate::from_parts(14, 7, 2025)));
        assert_eq!(record.expiry_date, Some(LabelDate::from_parts(12, 4, 2026)));
        assert_eq!(record.flavour, Some("Pepsi".to_string()));
        assert_eq!(record, parse_label("xxxxxxxxxx 01/01/20 MFD 14/07/25 12/04/26 pepsi"));
    }
}
