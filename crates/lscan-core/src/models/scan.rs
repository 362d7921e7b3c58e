//! Stored scan records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::label::ExtractedRecord;

/// One saved label scan: the parsed fields plus the context they were
/// captured in. Fields may have been edited by the user after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Store-assigned identifier (0 until saved).
    #[serde(default)]
    pub id: u64,

    /// When the scan was taken.
    pub timestamp: DateTime<Utc>,

    /// OCR transcription the fields were parsed from.
    #[serde(default)]
    pub raw_text: String,

    /// Extracted (and possibly user-edited) fields.
    pub fields: ExtractedRecord,

    /// Warehouse location code entered by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ScanRecord {
    /// Create an unsaved record stamped with the current time.
    pub fn new(raw_text: impl Into<String>, fields: ExtractedRecord) -> Self {
        Self {
            id: 0,
            timestamp: Utc::now(),
            raw_text: raw_text.into(),
            fields,
            location: None,
        }
    }

    /// Attach a location code; blank input clears it.
    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        self
    }

    /// Override the capture time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
