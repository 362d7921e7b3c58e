//! Google Cloud Vision text detection client.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::OcrEngine;
use crate::error::OcrError;
use crate::models::config::GoogleVisionConfig;

const ENGINE_NAME: &str = "google-vision";

/// Google Cloud Vision `TEXT_DETECTION` engine.
pub struct GoogleVisionEngine {
    client: Client,
    api_key: String,
    endpoint: String,
    language_hints: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    #[serde(default)]
    text_annotations: Vec<TextAnnotation>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct TextAnnotation {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

impl GoogleVisionEngine {
    /// Create a client from configuration.
    pub fn new(config: &GoogleVisionConfig) -> Result<Self, OcrError> {
        if config.api_key.is_empty() {
            return Err(OcrError::NotConfigured("Google Vision API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            language_hints: config.language_hints.clone(),
        })
    }

    fn request_body(&self, image: &[u8]) -> serde_json::Value {
        json!({
            "requests": [{
                "image": { "content": base64::engine::general_purpose::STANDARD.encode(image) },
                "features": [{ "type": "TEXT_DETECTION", "maxResults": 1 }],
                "imageContext": { "languageHints": self.language_hints },
            }]
        })
    }
}

#[async_trait]
impl OcrEngine for GoogleVisionEngine {
    fn name(&self) -> &str {
        ENGINE_NAME
    }

    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        debug!("POST {} ({} image bytes)", self.endpoint, image.len());

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&self.request_body(image))
            .send()
            .await?;

        let status = response.status();
        let body: AnnotateResponse = response.json().await?;
        if !status.is_success() && body.error.is_none() {
            return Err(OcrError::Service {
                engine: ENGINE_NAME.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let text = transcription_from(body)?;
        info!("{} returned {} characters", ENGINE_NAME, text.len());
        Ok(text)
    }
}

fn transcription_from(body: AnnotateResponse) -> Result<String, OcrError> {
    let service_error = |message: String| OcrError::Service {
        engine: ENGINE_NAME.to_string(),
        message,
    };

    if let Some(error) = body.error {
        return Err(service_error(error.message));
    }

    let first = body
        .responses
        .into_iter()
        .next()
        .ok_or_else(|| service_error("empty response".to_string()))?;

    if let Some(error) = first.error {
        return Err(service_error(error.message));
    }

    // No annotations means no text was found, which is not an error.
    Ok(first
        .text_annotations
        .into_iter()
        .next()
        .map(|a| a.description)
        .unwrap_or_default())
}
