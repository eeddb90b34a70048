use crate::error::ApiError;
use crate::provider::profile::{provider_type_slug, ProviderConfig, ValidationResult};
use crate::provider::{CompletionOptions, ModelProviderClient};
use serde::Serialize;
use std::time::Instant;

/// Prompt used by the connectivity smoke test.
pub const SMOKE_TEST_PROMPT: &str =
    "Explain generative AI in manufacturing in 5 bullet points.";

/// Reply summary from a smoke-test completion.
#[derive(Debug, Clone, Serialize)]
pub struct SmokeTestResult {
    pub provider: String,
    pub model: String,
    pub reply_chars: usize,
    pub elapsed_ms: u128,
    pub preview: String,
}

pub struct ProviderDiagnosticsService;

impl ProviderDiagnosticsService {
    pub fn resolve_api_key_status(provider: &ProviderConfig) -> String {
        match provider.provider_type.api_key_env_var() {
            None => "Not required".to_string(),
            Some(env_var) => {
                let non_blank = |k: &str| !k.trim().is_empty();
                if provider.api_key.as_deref().is_some_and(non_blank) {
                    "Set (from config)".to_string()
                } else if std::env::var(env_var).is_ok_and(|k| non_blank(&k)) {
                    "Set (from environment)".to_string()
                } else {
                    "Not set".to_string()
                }
            }
        }
    }

    /// Check a provider configuration without contacting the provider.
    pub fn validate_provider(provider: &ProviderConfig) -> ValidationResult {
        let mut result =
            ValidationResult::new(provider_type_slug(provider.provider_type).to_string());

        result.add_check("Provider type is valid", true);

        if provider.model.trim().is_empty() {
            result.add_error("Model name cannot be empty".to_string());
        } else {
            result.add_check("Model is not empty", true);
        }

        match provider.provider_type.api_key_env_var() {
            Some(env_var) => {
                let from_config = provider
                    .api_key
                    .as_ref()
                    .map(|k| !k.trim().is_empty())
                    .unwrap_or(false);
                let from_env = std::env::var(env_var)
                    .map(|k| !k.trim().is_empty())
                    .unwrap_or(false);
                if from_config || from_env {
                    let source = if from_config {
                        "from config"
                    } else {
                        "from environment"
                    };
                    result.add_check(&format!("API key available ({})", source), true);
                } else {
                    result.add_error(format!(
                        "API key not found (set {} or add provider.api_key to config)",
                        env_var
                    ));
                }
            }
            None => {
                result.add_check("API key not required for local provider", true);
            }
        }

        if let Some(endpoint) = &provider.endpoint {
            if ProviderConfig::endpoint_url_is_valid(endpoint) {
                result.add_check("Endpoint URL is valid", true);
            } else {
                result.add_error(format!("Invalid endpoint URL: {}", endpoint));
            }
        } else {
            result.add_check("Endpoint URL (provider default)", true);
        }

        if let Some(temp) = provider.default_options.temperature {
            if (0.0..=2.0).contains(&temp) {
                result.add_check("Temperature is in valid range (0.0-2.0)", true);
            } else {
                result.add_error(format!(
                    "Temperature must be between 0.0 and 2.0, got {}",
                    temp
                ));
            }
        }

        if let Some(max_tokens) = provider.default_options.max_tokens {
            if max_tokens > 0 {
                result.add_check("Max tokens is positive", true);
            } else {
                result.add_error("Max tokens must be positive".to_string());
            }
        }

        if let Some(top_p) = provider.default_options.top_p {
            if (0.0..=1.0).contains(&top_p) {
                result.add_check("Top-p is in valid range (0.0-1.0)", true);
            } else {
                result.add_error(format!("Top-p must be between 0.0 and 1.0, got {}", top_p));
            }
        }

        if provider.provider_type != crate::provider::ProviderType::Gemini
            && provider.model == crate::provider::profile::DEFAULT_GEMINI_MODEL
        {
            result.add_warning(format!(
                "Model '{}' is a Gemini model but provider type is {}",
                provider.model,
                provider_type_slug(provider.provider_type)
            ));
        }

        result
    }

    /// Send the smoke-test prompt and report what came back.
    pub async fn smoke_test(
        client: &dyn ModelProviderClient,
        options: &CompletionOptions,
    ) -> Result<SmokeTestResult, ApiError> {
        let started = Instant::now();
        let reply = client.complete(SMOKE_TEST_PROMPT, options).await?;
        let preview: String = reply.chars().take(200).collect();
        Ok(SmokeTestResult {
            provider: client.provider_name().to_string(),
            model: client.model().to_string(),
            reply_chars: reply.chars().count(),
            elapsed_ms: started.elapsed().as_millis(),
            preview,
        })
    }
}
