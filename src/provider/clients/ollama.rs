//! Ollama `/api/generate` client for locally hosted models.

use super::send_json;
use crate::error::ProviderError;
use crate::provider::{CompletionOptions, ModelProviderClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "ollama";

pub struct OllamaClient {
    http: reqwest::Client,
    model: String,
    base_url: String,
}

impl OllamaClient {
    pub fn new(model: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[async_trait]
impl ModelProviderClient for OllamaClient {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
                top_p: options.top_p,
            },
        };

        let url = format!("{}/api/generate", self.base_url);
        tracing::debug!(model = %self.model, url = %url, "Sending Ollama generate request");
        let response: GenerateResponse =
            send_json(PROVIDER, self.http.post(url).json(&body)).await?;
        Ok(response.response)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
