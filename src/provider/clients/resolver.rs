use super::{GeminiClient, OllamaClient, OpenAiClient};
use crate::error::ApiError;
use crate::provider::profile::{ProviderConfig, ProviderType};
use crate::provider::ModelProviderClient;
use std::sync::Arc;

/// Builds the oracle client for a provider configuration.
///
/// The CLI holds one resolver and asks it for a client only when a command
/// actually needs the oracle, so demo runs never touch credentials.
pub trait ProviderClientResolver: Send + Sync {
    fn create_client(
        &self,
        config: &ProviderConfig,
    ) -> Result<Arc<dyn ModelProviderClient>, ApiError>;
}

/// Resolver producing the real HTTP clients.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultClientResolver;

impl ProviderClientResolver for DefaultClientResolver {
    fn create_client(
        &self,
        config: &ProviderConfig,
    ) -> Result<Arc<dyn ModelProviderClient>, ApiError> {
        config.validate().map_err(ApiError::ConfigError)?;
        let endpoint = config.resolved_endpoint();
        let model = config.model.clone();

        let client: Arc<dyn ModelProviderClient> = match config.provider_type {
            ProviderType::Gemini => {
                let api_key = required_key(config)?;
                Arc::new(GeminiClient::new(model, api_key, endpoint))
            }
            ProviderType::OpenAI => {
                let api_key = required_key(config)?;
                Arc::new(OpenAiClient::new(model, api_key, endpoint))
            }
            ProviderType::Ollama => Arc::new(OllamaClient::new(model, endpoint)),
        };

        tracing::debug!(
            provider = client.provider_name(),
            model = client.model(),
            "Created provider client"
        );
        Ok(client)
    }
}

fn required_key(config: &ProviderConfig) -> Result<String, ApiError> {
    config.resolve_api_key()?.ok_or_else(|| {
        ApiError::ConfigError(format!(
            "Provider {:?} requires an API key",
            config.provider_type
        ))
    })
}
