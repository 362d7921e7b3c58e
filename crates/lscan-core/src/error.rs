//! Error types for the lscan-core library.
//!
//! The label parser itself never fails; these errors belong to the
//! collaborators around it (OCR, storage, export) and to parsing
//! user-supplied date strings.

use thiserror::Error;

/// Main error type for the lscan library.
#[derive(Error, Debug)]
pub enum LscanError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Scan storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// Image processing error.
    #[cfg(feature = "native")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The engine is missing credentials or models.
    #[error("engine not configured: {0}")]
    NotConfigured(String),

    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// The HTTP request to a hosted OCR service failed.
    #[error("request failed: {0}")]
    Request(String),

    /// The OCR service answered with an error.
    #[error("{engine} reported an error: {message}")]
    Service { engine: String, message: String },

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Image preprocessing failed.
    #[error("preprocessing failed: {0}")]
    Preprocessing(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Every engine consulted failed.
    #[error("no engine produced a transcription: {0}")]
    NoTranscription(String),
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for OcrError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OcrError::Request(format!("timed out: {}", err))
        } else {
            OcrError::Request(err.to_string())
        }
    }
}

/// Errors related to label field values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Failed to parse a value.
    #[error("failed to parse {field}: {value:?}")]
    Parse { field: String, value: String },
}

/// Errors related to scan storage.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a valid scan database.
    #[error("corrupt scan database {path}: {reason}")]
    Corrupt { path: String, reason: String },
}

/// Errors related to report generation.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// XML writer failure.
    #[error("XML error: {0}")]
    Xml(String),

    /// Output was not valid UTF-8.
    #[error("invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Flushing the writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the lscan library.
pub type Result<T> = std::result::Result<T, LscanError>;
