//! OCR collaborators: engines that turn a label photograph into text.
//!
//! The label parser only ever sees the final transcription. Engine choice,
//! racing and scoring stay in this module.

mod scoring;
mod select;

#[cfg(feature = "native")]
mod google_vision;
#[cfg(feature = "local-ocr")]
mod local;
#[cfg(feature = "native")]
mod ocr_space;
#[cfg(feature = "native")]
mod preprocessing;

pub use scoring::score_transcription;
pub use select::{fetch_best_transcription, Transcription};

#[cfg(feature = "native")]
pub use google_vision::GoogleVisionEngine;
#[cfg(feature = "local-ocr")]
pub use local::LocalOcrEngine;
#[cfg(feature = "native")]
pub use ocr_space::OcrSpaceEngine;
#[cfg(feature = "native")]
pub use preprocessing::prepare_image;
#[cfg(feature = "native")]
pub use select::build_engines;

use async_trait::async_trait;

use crate::error::OcrError;

/// A source of label transcriptions.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Short engine name used in logs and results.
    fn name(&self) -> &str;

    /// Recognize the text in an encoded image (PNG, JPEG, ...).
    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError>;
}
