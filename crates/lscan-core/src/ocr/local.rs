//! Local OCR engine using `pure-onnx-ocr` (pure Rust, no external runtime).

use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info};

use super::OcrEngine;
use crate::error::OcrError;
use crate::models::config::LocalOcrConfig;

/// Lines whose top edges are within this many pixels read as one row.
const ROW_HEIGHT: f64 = 20.0;

/// On-device OCR engine backed by PaddleOCR ONNX models.
pub struct LocalOcrEngine {
    engine: Mutex<pure_onnx_ocr::engine::OcrEngine>,
    keep_unk: bool,
}

impl LocalOcrEngine {
    /// Load models from the configured directory.
    pub fn from_config(config: &LocalOcrConfig) -> Result<Self, OcrError> {
        Self::from_dir(&config.model_dir, config.keep_unk)
    }

    /// Load `det.onnx`, `latin_rec.onnx` and `latin_dict.txt` from a directory.
    pub fn from_dir(model_dir: &Path, keep_unk: bool) -> Result<Self, OcrError> {
        let det_path = model_dir.join("det.onnx");
        let rec_path = model_dir.join("latin_rec.onnx");
        let dict_path = model_dir.join("latin_dict.txt");

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::NotConfigured(format!(
                    "model file not found: {}",
                    path.display()
                )));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded local OCR models from {}", model_dir.display());

        Ok(Self {
            engine: Mutex::new(engine),
            keep_unk,
        })
    }
}

#[async_trait]
impl OcrEngine for LocalOcrEngine {
    fn name(&self) -> &str {
        "local"
    }

    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        let start = Instant::now();
        let image = image::load_from_memory(image)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;

        let results = {
            let engine = self
                .engine
                .lock()
                .map_err(|_| OcrError::Recognition("engine lock poisoned".to_string()))?;
            engine
                .run_from_image(&image)
                .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?
        };

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let mut lines: Vec<(f64, f64, String)> = results
            .iter()
            .map(|r| {
                let (x, y) = top_left(&r.bounding_box);
                let text = if self.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                (x, y, text)
            })
            .collect();

        // Reading order: rows top to bottom, then left to right.
        lines.sort_by(|a, b| {
            let row_a = (a.1 / ROW_HEIGHT) as i64;
            let row_b = (b.1 / ROW_HEIGHT) as i64;
            row_a
                .cmp(&row_b)
                .then(a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        });

        let text = lines
            .into_iter()
            .map(|(_, _, t)| t)
            .collect::<Vec<_>>()
            .join("\n");

        info!(
            "Local OCR complete: {} characters in {}ms",
            text.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

fn top_left(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f64, f64) {
    polygon
        .exterior()
        .coords()
        .take(4)
        .fold((f64::MAX, f64::MAX), |(x, y), c| (x.min(c.x), y.min(c.y)))
}
