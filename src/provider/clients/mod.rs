//! HTTP clients for the supported providers.

mod gemini;
mod ollama;
mod openai;
mod resolver;

pub use gemini::GeminiClient;
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;
pub use resolver::{DefaultClientResolver, ProviderClientResolver};

use crate::error::ProviderError;
use serde::de::DeserializeOwned;

/// Send a prepared request and decode a JSON body, mapping failures onto
/// [`ProviderError`].
pub(crate) async fn send_json<T: DeserializeOwned>(
    provider: &str,
    request: reqwest::RequestBuilder,
) -> Result<T, ProviderError> {
    let response = request.send().await.map_err(|source| {
        tracing::warn!(provider, error = %source, "Provider request failed before a response");
        ProviderError::Transport {
            provider: provider.to_string(),
            source,
        }
    })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| ProviderError::Transport {
            provider: provider.to_string(),
            source,
        })?;

    if !status.is_success() {
        let err = status_error(provider, status.as_u16(), body);
        tracing::warn!(provider, status = status.as_u16(), error = %err, "Provider rejected request");
        return Err(err);
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::InvalidResponse {
        provider: provider.to_string(),
        message: format!("Failed to parse response body: {}", e),
    })
}

/// Classify a non-success HTTP status.
pub(crate) fn status_error(provider: &str, status: u16, body: String) -> ProviderError {
    let message = error_message(&body);
    match status {
        401 | 403 => ProviderError::Authentication {
            provider: provider.to_string(),
            status,
            message,
        },
        429 => {
            let lowered = body.to_ascii_lowercase();
            if lowered.contains("quota") || lowered.contains("resource_exhausted") {
                ProviderError::QuotaExceeded {
                    provider: provider.to_string(),
                    message,
                }
            } else {
                ProviderError::RateLimited {
                    provider: provider.to_string(),
                    message,
                }
            }
        }
        _ => ProviderError::Api {
            provider: provider.to_string(),
            status,
            body: message,
        },
    }
}

/// Pull `error.message` (or a string `error`) out of a JSON error body,
/// falling back to the body itself.
fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let from_json = parsed.as_ref().and_then(|v| {
        let error = v.get("error")?;
        error
            .get("message")
            .and_then(|m| m.as_str())
            .or_else(|| error.as_str())
            .map(str::to_string)
    });
    from_json.unwrap_or_else(|| body.trim().to_string())
}
