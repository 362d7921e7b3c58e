//! Core library for product label scanning.
//!
//! This crate provides:
//! - Label field extraction (batch number, manufacturing/expiry dates, flavour)
//!   with per-field confidence
//! - OCR clients (OCR.space, Google Cloud Vision, local ONNX) and best-of-N
//!   transcription selection
//! - Scan storage and CSV / item-tracking XML export

pub mod error;
pub mod export;
pub mod label;
pub mod models;
pub mod ocr;
pub mod store;

pub use error::{ExportError, ExtractionError, LscanError, OcrError, Result, StorageError};
pub use export::{scans_to_csv, scans_to_xml, ExportFormat};
pub use label::{parse_label, LabelExtractor, LabelParser};
pub use models::config::{EngineChoice, ExtractionConfig, LscanConfig, OcrConfig};
pub use models::label::{Confidence, ExtractedRecord, FieldConfidence, LabelDate};
pub use models::scan::ScanRecord;
pub use ocr::{fetch_best_transcription, score_transcription, OcrEngine, Transcription};
#[cfg(feature = "native")]
pub use ocr::{build_engines, prepare_image};
pub use store::{MemoryStore, ScanStore};
#[cfg(feature = "native")]
pub use store::JsonFileStore;
