//! OCR.space hosted OCR client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::OcrEngine;
use crate::error::OcrError;
use crate::models::config::OcrSpaceConfig;

/// One OCR.space engine number behind the hosted API.
pub struct OcrSpaceEngine {
    client: Client,
    name: String,
    api_key: String,
    endpoint: String,
    language: String,
    engine_number: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrSpaceResponse {
    #[serde(default)]
    is_errored_on_processing: bool,
    /// A string or a list of strings depending on the failure.
    #[serde(default)]
    error_message: serde_json::Value,
    #[serde(default)]
    parsed_results: Option<Vec<ParsedResult>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParsedResult {
    #[serde(default)]
    parsed_text: String,
}

impl OcrSpaceEngine {
    /// Create a client for one OCR.space engine number.
    pub fn new(config: &OcrSpaceConfig, engine_number: u8) -> Result<Self, OcrError> {
        if config.api_key.is_empty() {
            return Err(OcrError::NotConfigured("OCR.space API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            name: format!("ocr-space-{}", engine_number),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            language: config.language.clone(),
            engine_number,
        })
    }
}

#[async_trait]
impl OcrEngine for OcrSpaceEngine {
    fn name(&self) -> &str {
        &self.name
    }

    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        let format = image::guess_format(image)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;
        let mime = format.to_mime_type();
        let ext = format.extensions_str().first().copied().unwrap_or("png");

        let part = Part::bytes(image.to_vec())
            .file_name(format!("label.{}", ext))
            .mime_str(mime)?;

        let form = Form::new()
            .text("apikey", self.api_key.clone())
            .text("language", self.language.clone())
            .text("OCREngine", self.engine_number.to_string())
            .text("scale", "true")
            .text("isTable", "false")
            .text("detectOrientation", "true")
            .part("file", part);

        debug!("POST {} (engine {})", self.endpoint, self.engine_number);

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::Service {
                engine: self.name.clone(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let body: OcrSpaceResponse = response.json().await?;
        let text = transcription_from(&self.name, body)?;

        info!("{} returned {} characters", self.name, text.len());
        Ok(text)
    }
}

fn transcription_from(engine: &str, body: OcrSpaceResponse) -> Result<String, OcrError> {
    if body.is_errored_on_processing {
        return Err(OcrError::Service {
            engine: engine.to_string(),
            message: error_text(&body.error_message),
        });
    }

    let results = body.parsed_results.unwrap_or_default();
    let Some(first) = results.into_iter().next() else {
        return Err(OcrError::Service {
            engine: engine.to_string(),
            message: "no parsed results".to_string(),
        });
    };

    Ok(first.parsed_text)
}

fn error_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join("; "),
        serde_json::Value::Null => "unknown error".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<String, OcrError> {
        let body: OcrSpaceResponse = serde_json::from_str(json).unwrap();
        transcription_from("ocr-space-1", body)
    }

    #[test]
    fn test_parsed_text() {
        let text = parse(
            r#"{"ParsedResults":[{"ParsedText":"PEPSI\r\n14/07/25","ErrorMessage":""}],
                "OCRExitCode":1,"IsErroredOnProcessing":false}"#,
        )
        .unwrap();
        assert_eq!(text, "PEPSI\r\n14/07/25");
    }

    #[test]
    fn test_service_error_list() {
        let err = parse(
            r#"{"IsErroredOnProcessing":true,"ErrorMessage":["File failed validation","Too large"]}"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "ocr-space-1 reported an error: File failed validation; Too large"
        );
    }

    #[test]
    fn test_missing_results() {
        assert!(matches!(
            parse(r#"{"IsErroredOnProcessing":false}"#),
            Err(OcrError::Service { .. })
        ));
    }

    #[test]
    fn test_requires_key() {
        assert!(OcrSpaceEngine::new(&OcrSpaceConfig::default(), 1).is_err());
    }
}
