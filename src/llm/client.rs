use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::model::{GenerationClient, ModelConfig};
use crate::error::{NewsletterError, Result};

/// Client for an Ollama server's non-streaming `/api/generate` endpoint.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
}

#[derive(Debug, Clone, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Clone, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

impl OllamaClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                NewsletterError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    fn generate_url(endpoint: &str) -> String {
        format!("{}/api/generate", endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl GenerationClient for OllamaClient {
    async fn complete(&self, prompt: &str, config: &ModelConfig) -> Result<String> {
        let request = GenerateRequest {
            model: &config.model_name,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: config.temperature,
            },
        };

        let response = self
            .client
            .post(Self::generate_url(&config.endpoint))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                NewsletterError::GenerationFailed(format!(
                    "could not reach model endpoint {} (is Ollama running?): {}",
                    config.endpoint, e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NewsletterError::GenerationFailed(format!(
                "model endpoint error ({}): {}",
                status, body
            )));
        }

        let api_response: GenerateResponse = response.json().await.map_err(|e| {
            NewsletterError::GenerationFailed(format!("failed to parse model response: {}", e))
        })?;

        let text = api_response.response.unwrap_or_default();
        if text.trim().is_empty() {
            return Err(NewsletterError::GenerationFailed(
                "model returned an empty response".to_string(),
            ));
        }

        Ok(text)
    }
}
