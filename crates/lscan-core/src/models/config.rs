//! Configuration structures for the scanning pipeline.
//!
//! Credentials and engine selection travel inside these values; nothing in
//! the library reads them from process-wide state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for lscan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LscanConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Label field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Scan storage configuration.
    pub storage: StorageConfig,
}

/// Which OCR engine produces the transcription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineChoice {
    /// OCR.space hosted API.
    OcrSpace,
    /// Google Cloud Vision hosted API.
    GoogleVision,
    /// Local pure-Rust ONNX engine.
    Local,
    /// Run every configured engine and keep the best-scoring transcription.
    #[default]
    Best,
}

/// OCR configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Engine used by `scan` when none is given on the command line.
    pub engine: EngineChoice,

    /// Prepare images (downscale, grayscale, contrast, sharpen) before OCR.
    pub preprocess: bool,

    /// Images wider than this are downscaled before upload.
    pub max_image_width: u32,

    /// OCR.space settings.
    pub ocr_space: OcrSpaceConfig,

    /// Google Cloud Vision settings.
    pub google_vision: GoogleVisionConfig,

    /// Local engine settings.
    pub local: LocalOcrConfig,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine: EngineChoice::Best,
            preprocess: true,
            max_image_width: 1600,
            ocr_space: OcrSpaceConfig::default(),
            google_vision: GoogleVisionConfig::default(),
            local: LocalOcrConfig::default(),
        }
    }
}

/// OCR.space hosted API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSpaceConfig {
    /// API key. Empty disables the engine.
    pub api_key: String,

    /// Endpoint URL.
    pub endpoint: String,

    /// OCR.space engine numbers to query; each becomes one candidate.
    pub engines: Vec<u8>,

    /// Language code sent with the request.
    pub language: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OcrSpaceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://api.ocr.space/parse/image".to_string(),
            engines: vec![1, 2],
            language: "eng".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Google Cloud Vision settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleVisionConfig {
    /// API key. Empty disables the engine.
    pub api_key: String,

    /// Endpoint URL (the key is appended as a query parameter).
    pub endpoint: String,

    /// Language hints sent with the request.
    pub language_hints: Vec<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GoogleVisionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://vision.googleapis.com/v1/images:annotate".to_string(),
            language_hints: vec!["en".to_string()],
            timeout_secs: 30,
        }
    }
}

/// Local engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalOcrConfig {
    /// Directory containing `det.onnx`, `latin_rec.onnx` and `latin_dict.txt`.
    pub model_dir: PathBuf,

    /// Keep `[UNK]` tokens in recognized text.
    pub keep_unk: bool,
}

impl Default for LocalOcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            keep_unk: false,
        }
    }
}

/// Label field extraction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Drop date candidates whose day/month are not a real calendar day
    /// (e.g. `31/14/25`).
    pub strict_dates: bool,

    /// Product names checked after the built-in vocabulary.
    pub extra_flavours: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            strict_dates: true,
            extra_flavours: Vec::new(),
        }
    }
}

/// Scan storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON scan database. `None` uses the platform data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl LscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Copy with API keys masked, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        redact(&mut config.ocr.ocr_space.api_key);
        redact(&mut config.ocr.google_vision.api_key);
        config
    }
}

fn redact(key: &mut String) {
    if !key.is_empty() {
        *key = "********".to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: LscanConfig =
            serde_json::from_str(r#"{"ocr": {"engine": "ocr-space"}}"#).unwrap();
        assert_eq!(config.ocr.engine, EngineChoice::OcrSpace);
        assert_eq!(config.ocr.max_image_width, 1600);
        assert_eq!(config.ocr.ocr_space.engines, vec![1, 2]);
        assert!(config.extraction.strict_dates);
    }

    #[test]
    fn test_redacted_masks_keys() {
        let mut config = LscanConfig::default();
        config.ocr.google_vision.api_key = "secret".to_string();

        let shown = config.redacted();
        assert_eq!(shown.ocr.google_vision.api_key, "********");
        assert!(shown.ocr.ocr_space.api_key.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = LscanConfig::default();
        config.extraction.extra_flavours = vec!["NIMBOOZ".to_string()];
        config.save(&path).unwrap();

        let loaded = LscanConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction, config.extraction);
    }
}
