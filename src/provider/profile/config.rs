use crate::error::ApiError;
use crate::provider::CompletionOptions;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Model provider configuration, read from the `[provider]` config section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider type.
    #[serde(default)]
    pub provider_type: ProviderType,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// API key optional and can be loaded from environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL; each provider type has its own default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Default completion options for this provider.
    #[serde(default)]
    pub default_options: CompletionOptions,
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: ProviderType::default(),
            model: default_model(),
            api_key: None,
            endpoint: None,
            default_options: CompletionOptions::default(),
        }
    }
}

/// Provider type enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderType {
    #[default]
    #[serde(rename = "gemini")]
    Gemini,
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "ollama")]
    Ollama,
}

impl ProviderType {
    pub fn parse(type_str: &str) -> Result<Self, ApiError> {
        match type_str {
            "gemini" => Ok(ProviderType::Gemini),
            "openai" => Ok(ProviderType::OpenAI),
            "ollama" => Ok(ProviderType::Ollama),
            _ => Err(ApiError::ConfigError(format!(
                "Invalid provider type: {}. Must be gemini, openai, or ollama",
                type_str
            ))),
        }
    }

    pub fn default_endpoint(self) -> &'static str {
        match self {
            ProviderType::Gemini => "https://generativelanguage.googleapis.com",
            ProviderType::OpenAI => "https://api.openai.com/v1",
            ProviderType::Ollama => "http://localhost:11434",
        }
    }

    /// Environment variable holding the credential, if the provider needs one.
    pub fn api_key_env_var(self) -> Option<&'static str> {
        match self {
            ProviderType::Gemini => Some("GEMINI_API_KEY"),
            ProviderType::OpenAI => Some("OPENAI_API_KEY"),
            ProviderType::Ollama => None,
        }
    }
}

impl ProviderConfig {
    fn endpoint_has_scheme(endpoint: &str) -> bool {
        endpoint.starts_with("http://") || endpoint.starts_with("https://")
    }

    /// Configured endpoint or the provider default, without a trailing slash.
    pub fn resolved_endpoint(&self) -> String {
        let endpoint = self
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| self.provider_type.default_endpoint());
        endpoint.trim_end_matches('/').to_string()
    }

    pub fn endpoint_url_is_valid(endpoint: &str) -> bool {
        let endpoint = endpoint.trim();
        if !Self::endpoint_has_scheme(endpoint) {
            return false;
        }

        let Some(rest) = endpoint.split_once("://").map(|(_, rest)| rest) else {
            return false;
        };

        if rest.is_empty() || rest.chars().any(char::is_whitespace) {
            return false;
        }

        let authority = rest.split('/').next().unwrap_or_default();
        if authority.is_empty() {
            return false;
        }

        let host_port = authority.rsplit('@').next().unwrap_or(authority);
        if host_port.is_empty() {
            return false;
        }

        let host = if host_port.starts_with('[') {
            let Some(end_bracket) = host_port.find(']') else {
                return false;
            };
            &host_port[1..end_bracket]
        } else {
            host_port.split(':').next().unwrap_or_default()
        };

        if host.is_empty() {
            return false;
        }

        host == "localhost" || host.contains('.') || host.parse::<std::net::IpAddr>().is_ok()
    }

    /// Validate provider configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }

        if let Some(endpoint) = &self.endpoint {
            if !Self::endpoint_url_is_valid(endpoint) {
                return Err(format!("Invalid endpoint URL: {}", endpoint));
            }
        }

        if let Some(temp) = self.default_options.temperature {
            if !(0.0..=2.0).contains(&temp) {
                return Err(format!(
                    "Temperature must be between 0.0 and 2.0, got {}",
                    temp
                ));
            }
        }

        if let Some(top_p) = self.default_options.top_p {
            if !(0.0..=1.0).contains(&top_p) {
                return Err(format!("Top-p must be between 0.0 and 1.0, got {}", top_p));
            }
        }

        if self.default_options.max_tokens == Some(0) {
            return Err("Max tokens must be positive".to_string());
        }

        Ok(())
    }

    /// Credential from config, then from the provider's environment variable.
    ///
    /// `Ok(None)` means the provider does not need one.
    pub fn resolve_api_key(&self) -> Result<Option<String>, ApiError> {
        let Some(env_var) = self.provider_type.api_key_env_var() else {
            return Ok(None);
        };
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            return Ok(Some(key.clone()));
        }
        match std::env::var(env_var) {
            Ok(key) if !key.trim().is_empty() => Ok(Some(key)),
            _ => Err(ApiError::ConfigError(format!(
                "{} not found. Set it in the environment, a .env file, or provider.api_key",
                env_var
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn gemini_config() -> ProviderConfig {
        ProviderConfig::default()
    }

    #[test]
    fn defaults_target_gemini_flash() {
        let provider = gemini_config();
        assert_eq!(provider.provider_type, ProviderType::Gemini);
        assert_eq!(provider.model, "gemini-2.5-flash");
        assert_eq!(
            provider.resolved_endpoint(),
            "https://generativelanguage.googleapis.com"
        );
    }

    #[test]
    fn resolved_endpoint_strips_trailing_slash() {
        let provider = ProviderConfig {
            provider_type: ProviderType::Ollama,
            endpoint: Some("http://gpu-box.local:11434/".to_string()),
            ..gemini_config()
        };
        assert_eq!(provider.resolved_endpoint(), "http://gpu-box.local:11434");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut provider = gemini_config();
        provider.model = "  ".to_string();
        assert!(provider.validate().is_err());

        let mut provider = gemini_config();
        provider.endpoint = Some("generativelanguage".to_string());
        assert!(provider.validate().is_err());

        let mut provider = gemini_config();
        provider.default_options.temperature = Some(3.5);
        assert!(provider.validate().is_err());

        let mut provider = gemini_config();
        provider.default_options.top_p = Some(1.5);
        assert!(provider.validate().is_err());

        let mut provider = gemini_config();
        provider.default_options.max_tokens = Some(0);
        assert!(provider.validate().is_err());
    }

    #[test]
    fn endpoint_validation_accepts_hosts_and_ips() {
        assert!(ProviderConfig::endpoint_url_is_valid("http://localhost:11434"));
        assert!(ProviderConfig::endpoint_url_is_valid("http://127.0.0.1:8080/v1"));
        assert!(ProviderConfig::endpoint_url_is_valid("https://api.openai.com/v1"));
        assert!(!ProviderConfig::endpoint_url_is_valid("https://"));
        assert!(!ProviderConfig::endpoint_url_is_valid("ftp://example.com"));
    }

    #[test]
    fn parse_provider_type() {
        assert_eq!(ProviderType::parse("gemini").unwrap(), ProviderType::Gemini);
        assert_eq!(ProviderType::parse("ollama").unwrap(), ProviderType::Ollama);
        assert!(ProviderType::parse("bard").is_err());
    }

    #[test]
    #[serial]
    fn api_key_from_config_wins_over_environment() {
        std::env::set_var("GEMINI_API_KEY", "env-key");
        let provider = ProviderConfig {
            api_key: Some("config-key".to_string()),
            ..gemini_config()
        };
        let key = provider.resolve_api_key();
        std::env::remove_var("GEMINI_API_KEY");
        assert_eq!(key.unwrap().as_deref(), Some("config-key"));
    }

    #[test]
    #[serial]
    fn missing_api_key_is_a_config_error() {
        std::env::remove_var("GEMINI_API_KEY");
        let err = gemini_config().resolve_api_key().unwrap_err();
        assert!(matches!(err, ApiError::ConfigError(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY not found"));
    }

    #[test]
    fn ollama_needs_no_key() {
        let provider = ProviderConfig {
            provider_type: ProviderType::Ollama,
            ..gemini_config()
        };
        assert_eq!(provider.resolve_api_key().unwrap(), None);
    }
}
