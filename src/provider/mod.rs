//! Model provider integration.
//!
//! The text-completion oracle sits behind [`ModelProviderClient`]: one prompt
//! and a set of completion options in, generated text or a [`ProviderError`]
//! out. Concrete HTTP clients live in [`clients`]; provider configuration and
//! its validation live in [`profile`].

pub mod clients;
pub mod diagnostics;
pub mod profile;

use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use clients::{
    DefaultClientResolver, GeminiClient, OllamaClient, OpenAiClient, ProviderClientResolver,
};
pub use diagnostics::ProviderDiagnosticsService;
pub use profile::{ProviderConfig, ProviderType, ValidationResult};

/// Generation settings passed with every completion request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl CompletionOptions {
    /// Options with only a temperature set.
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature: Some(temperature),
            ..Self::default()
        }
    }

    /// Fill unset fields from `defaults`; values already set win.
    pub fn or(self, defaults: &CompletionOptions) -> Self {
        Self {
            temperature: self.temperature.or(defaults.temperature),
            max_tokens: self.max_tokens.or(defaults.max_tokens),
            top_p: self.top_p.or(defaults.top_p),
        }
    }
}

/// A text-completion oracle.
///
/// Implementations are constructed once per process and are read-only
/// afterwards. Whether a single client may serve overlapping calls depends on
/// the implementation; the HTTP clients in this crate share a `reqwest::Client`
/// which is safe to clone and use concurrently.
#[async_trait]
pub trait ModelProviderClient: Send + Sync {
    /// Generate text for `prompt`. An empty reply is `Ok(String::new())`.
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError>;

    /// Model identifier sent with each request.
    fn model(&self) -> &str;

    /// Short provider name used in logs and error messages.
    fn provider_name(&self) -> &'static str;
}
