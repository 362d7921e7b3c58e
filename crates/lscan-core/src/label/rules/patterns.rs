//! Common regex patterns for label field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Day, month, year separated by '/', '.' or '-'. Year is 4 or 2 digits.
    pub static ref DATE_PATTERN: Regex = Regex::new(
        r"([0-9]{1,2})[/.\-]([0-9]{1,2})[/.\-]([0-9]{4}|[0-9]{2})"
    ).unwrap();

    // Same shape, whole string only.
    pub static ref DATE_EXACT: Regex = Regex::new(
        r"^([0-9]{1,2})[/.\-]([0-9]{1,2})[/.\-]([0-9]{4}|[0-9]{2})$"
    ).unwrap();

    // Batch patterns, tried in order. Only the first match of each counts.
    // NN-NNNN-NNNN, the native format printed by the bottling lines
    pub static ref BATCH_NATIVE: Regex = Regex::new(
        r"([0-9]{2}-[0-9]{4}-[0-9]{4})"
    ).unwrap();

    pub static ref BATCH_LABELED: Regex = Regex::new(
        r"(?i)BATCH\s*NO\.?\s*[:\s]*([A-Za-z0-9_\-]{6,})"
    ).unwrap();

    pub static ref BATCH_SHORT: Regex = Regex::new(
        r"(?i)B\.?\s*NO\.?\s*[:\s]*([A-Za-z0-9_\-]{6,})"
    ).unwrap();

    pub static ref LOT_NUMBER: Regex = Regex::new(
        r"(?i)LOT\s*(?:NO\.?)?\s*[:\s]*([A-Za-z0-9_\-]{5,})"
    ).unwrap();

    // Generic flavour label: "FLAVOUR ORANGE"
    pub static ref FLAVOUR_LABEL: Regex = Regex::new(
        r"(?i)(?:FLAVOR|FLAVOUR)\s+([A-Za-z0-9_]+)"
    ).unwrap();
}

/// Keywords that precede a manufacturing date, in lookup order.
pub const MANUFACTURING_KEYWORDS: [&str; 6] =
    ["MANUFACTURE DATE", "MFG DATE", "MFG DT", "MFD", "PACKED", "PKD"];

/// Keywords that precede an expiry date, in lookup order.
pub const EXPIRY_KEYWORDS: [&str; 6] =
    ["EXPIRY DATE", "EXP DATE", "EXP DT", "BEST BEFORE", "USE BY", "BB"];

/// Keywords that suggest a transcription came from a label.
pub const LABEL_KEYWORDS: [&str; 6] = ["BATCH", "MFG", "EXP", "DATE", "MANUFACTURE", "EXPIRY"];

/// Product vocabulary. More specific names come before names they contain.
pub const FLAVOURS: [&str; 24] = [
    "PEPSI",
    "COLA",
    "SPRITE",
    "FANTA",
    "7UP",
    "7 UP",
    "MIRINDA",
    "MOUNTAIN DEW",
    "DEW",
    "SLICE",
    "MAAZA",
    "FROOTI",
    "APPY",
    "LIMCA",
    "THUMS UP",
    "THUMBS UP",
    "MANGO",
    "ORANGE",
    "LEMON",
    "STING",
    "GATORADE",
    "TROPICANA",
    "AQUAFINA",
    "KINLEY",
];

/// Whether the whole (trimmed) string is date-shaped.
pub fn is_date_shaped(s: &str) -> bool {
    DATE_EXACT.is_match(s.trim())
}
