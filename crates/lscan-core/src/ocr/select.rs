//! Run several engines on the same image and keep the best transcription.

use futures_util::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::scoring::score_transcription;
use super::OcrEngine;
use crate::error::OcrError;

/// The transcription that won a multi-engine run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcription {
    /// Recognized text.
    pub text: String,
    /// Name of the engine that produced it.
    pub engine: String,
    /// Heuristic score from [`score_transcription`].
    pub score: f32,
}

/// Query every engine concurrently and return the highest-scoring text.
///
/// Engines that fail are logged and skipped. Ties go to the engine listed
/// first. Fails only when no engine produced any text.
pub async fn fetch_best_transcription(
    engines: &[Box<dyn OcrEngine>],
    image: &[u8],
) -> Result<Transcription, OcrError> {
    if engines.is_empty() {
        return Err(OcrError::NotConfigured("no OCR engines available".to_string()));
    }

    info!("Running {} OCR engines", engines.len());

    let results = join_all(engines.iter().map(|engine| engine.recognize(image))).await;

    let mut best: Option<Transcription> = None;
    let mut failures = Vec::new();

    for (engine, result) in engines.iter().zip(results) {
        match result {
            Ok(text) => {
                let score = score_transcription(&text);
                debug!("{} scored {:.1} ({} chars)", engine.name(), score, text.len());
                if best.as_ref().is_none_or(|b| score > b.score) {
                    best = Some(Transcription {
                        text,
                        engine: engine.name().to_string(),
                        score,
                    });
                }
            }
            Err(e) => {
                warn!("{} failed: {}", engine.name(), e);
                failures.push(format!("{}: {}", engine.name(), e));
            }
        }
    }

    match best {
        Some(t) => {
            info!("Selected {} transcription (score {:.1})", t.engine, t.score);
            Ok(t)
        }
        None => Err(OcrError::NoTranscription(failures.join("; "))),
    }
}

#[cfg(feature = "native")]
pub use native::build_engines;

#[cfg(feature = "native")]
mod native {
    use tracing::debug;

    use crate::error::OcrError;
    use crate::models::config::{EngineChoice, OcrConfig};
    use crate::ocr::{GoogleVisionEngine, OcrEngine, OcrSpaceEngine};

    /// Build the engines selected by `choice` from configuration.
    ///
    /// `Best` collects every engine that is configured; a single named
    /// engine must be configured or this fails.
    pub fn build_engines(
        config: &OcrConfig,
        choice: EngineChoice,
    ) -> Result<Vec<Box<dyn OcrEngine>>, OcrError> {
        let mut engines: Vec<Box<dyn OcrEngine>> = Vec::new();

        if matches!(choice, EngineChoice::OcrSpace | EngineChoice::Best) {
            if config.ocr_space.api_key.is_empty() {
                if choice == EngineChoice::OcrSpace {
                    return Err(OcrError::NotConfigured(
                        "ocr.ocr_space.api_key is empty".to_string(),
                    ));
                }
                debug!("Skipping OCR.space: no API key");
            } else {
                for &number in &config.ocr_space.engines {
                    engines.push(Box::new(OcrSpaceEngine::new(&config.ocr_space, number)?));
                }
            }
        }

        if matches!(choice, EngineChoice::GoogleVision | EngineChoice::Best) {
            if config.google_vision.api_key.is_empty() {
                if choice == EngineChoice::GoogleVision {
                    return Err(OcrError::NotConfigured(
                        "ocr.google_vision.api_key is empty".to_string(),
                    ));
                }
                debug!("Skipping Google Vision: no API key");
            } else {
                engines.push(Box::new(GoogleVisionEngine::new(&config.google_vision)?));
            }
        }

        if matches!(choice, EngineChoice::Local | EngineChoice::Best) {
            push_local(config, choice, &mut engines)?;
        }

        if engines.is_empty() {
            return Err(OcrError::NotConfigured(
                "no OCR engine is configured; set an API key or model_dir".to_string(),
            ));
        }

        Ok(engines)
    }

    #[cfg(feature = "local-ocr")]
    fn push_local(
        config: &OcrConfig,
        choice: EngineChoice,
        engines: &mut Vec<Box<dyn OcrEngine>>,
    ) -> Result<(), OcrError> {
        use crate::ocr::LocalOcrEngine;

        match LocalOcrEngine::from_config(&config.local) {
            Ok(engine) => engines.push(Box::new(engine)),
            Err(e) if choice == EngineChoice::Best => debug!("Skipping local engine: {}", e),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    #[cfg(not(feature = "local-ocr"))]
    fn push_local(
        _config: &OcrConfig,
        choice: EngineChoice,
        _engines: &mut Vec<Box<dyn OcrEngine>>,
    ) -> Result<(), OcrError> {
        if choice == EngineChoice::Local {
            return Err(OcrError::NotConfigured(
                "built without the local-ocr feature".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    struct MockEngine {
        name: String,
        response: Result<String, String>,
    }

    impl MockEngine {
        fn ok(name: &str, text: &str) -> Box<dyn OcrEngine> {
            Box::new(Self {
                name: name.to_string(),
                response: Ok(text.to_string()),
            })
        }

        fn failing(name: &str) -> Box<dyn OcrEngine> {
            Box::new(Self {
                name: name.to_string(),
                response: Err("service unavailable".to_string()),
            })
        }
    }

    #[async_trait]
    impl OcrEngine for MockEngine {
        fn name(&self) -> &str {
            &self.name
        }

        async fn recognize(&self, _image: &[u8]) -> Result<String, OcrError> {
            self.response.clone().map_err(OcrError::Recognition)
        }
    }

    const LABEL: &str = "MFG DATE 14/07/25 EXP DATE 12/04/26 BATCH 25-8902-0014 PEPSI";

    #[tokio::test]
    async fn test_best_score_wins() {
        let engines = vec![
            MockEngine::ok("blurry", "PEPS1 l4/O7"),
            MockEngine::ok("sharp", LABEL),
        ];

        let best = fetch_best_transcription(&engines, b"img").await.unwrap();
        assert_eq!(best.engine, "sharp");
        assert_eq!(best.text, LABEL);
        assert_eq!(best.score, score_transcription(LABEL));
    }

    #[tokio::test]
    async fn test_failures_are_skipped() {
        let engines = vec![MockEngine::failing("down"), MockEngine::ok("up", "BB 01/02/27")];

        let best = fetch_best_transcription(&engines, b"img").await.unwrap();
        assert_eq!(best.engine, "up");
    }

    #[tokio::test]
    async fn test_tie_goes_to_first() {
        let engines = vec![MockEngine::ok("a", LABEL), MockEngine::ok("b", LABEL)];

        let best = fetch_best_transcription(&engines, b"img").await.unwrap();
        assert_eq!(best.engine, "a");
    }

    #[tokio::test]
    async fn test_all_failed() {
        let engines = vec![MockEngine::failing("x"), MockEngine::failing("y")];

        let err = fetch_best_transcription(&engines, b"img").await.unwrap_err();
        match err {
            OcrError::NoTranscription(msg) => {
                assert!(msg.contains("x: "));
                assert!(msg.contains("y: "));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_no_engines() {
        let err = fetch_best_transcription(&[], b"img").await.unwrap_err();
        assert!(matches!(err, OcrError::NotConfigured(_)));
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_build_engines_requires_configuration() {
        use crate::models::config::{EngineChoice, OcrConfig};

        let config = OcrConfig::default();
        assert!(build_engines(&config, EngineChoice::OcrSpace).is_err());
        assert!(build_engines(&config, EngineChoice::GoogleVision).is_err());

        let mut config = OcrConfig::default();
        config.ocr_space.api_key = "k".to_string();
        config.google_vision.api_key = "g".to_string();
        let engines = build_engines(&config, EngineChoice::Best).unwrap();
        let names: Vec<&str> = engines.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["ocr-space-1", "ocr-space-2", "google-vision"]);
    }
}
