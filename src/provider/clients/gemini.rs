//! Google Gemini `generateContent` client.

use super::send_json;
use crate::error::ProviderError;
use crate::provider::{CompletionOptions, ModelProviderClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "gemini";

pub struct GeminiClient {
    http: reqwest::Client,
    model: String,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(model: String, api_key: String, endpoint: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            model,
            api_key,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate; parts are concatenated, missing text is "".
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ModelProviderClient for GeminiClient {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_tokens,
                top_p: options.top_p,
            },
        };

        tracing::debug!(model = %self.model, url = %self.url(), "Sending Gemini generateContent request");
        let request = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body);

        let response: GenerateContentResponse = send_json(PROVIDER, request).await?;
        Ok(response.text())
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn sends_prompt_and_temperature_and_joins_parts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}],
                "generationConfig": {"temperature": 0.2}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#,
            )
            .create_async()
            .await;

        let client = GeminiClient::new(
            "gemini-2.5-flash".to_string(),
            "test-key".to_string(),
            server.url(),
        );
        let text = client
            .complete("hello", &CompletionOptions::with_temperature(0.2))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, r#"{"a":1}"#);
    }

    #[tokio::test]
    async fn missing_candidates_yield_empty_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_body(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(
            "gemini-2.5-flash".to_string(),
            "k".to_string(),
            server.url(),
        );
        let text = client
            .complete("hi", &CompletionOptions::default())
            .await
            .unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn quota_rejection_surfaces_as_quota_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(429)
            .with_body(
                r#"{"error":{"code":429,"message":"Quota exceeded for metric","status":"RESOURCE_EXHAUSTED"}}"#,
            )
            .create_async()
            .await;

        let client = GeminiClient::new(
            "gemini-2.5-flash".to_string(),
            "k".to_string(),
            server.url(),
        );
        let err = client
            .complete("hi", &CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::QuotaExceeded { .. }));
    }

    #[tokio::test]
    async fn undecodable_body_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let client = GeminiClient::new(
            "gemini-2.5-flash".to_string(),
            "k".to_string(),
            server.url(),
        );
        let err = client
            .complete("hi", &CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse { .. }));
    }
}
