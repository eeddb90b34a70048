//! Agent dispatcher: one mode end to end.

use crate::agent::extract::extract_json;
use crate::agent::mode::Mode;
use crate::agent::prompt::TemplateRegistry;
use crate::error::ApiError;
use crate::provider::{CompletionOptions, ModelProviderClient};
use std::sync::Arc;

/// Sampling temperature for every dispatch. Low to keep the JSON shape stable.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Resolves the template for a mode, calls the oracle and extracts the JSON
/// payload from its reply.
///
/// The client is injected; the dispatcher keeps no state between calls.
pub struct AgentDispatcher {
    templates: TemplateRegistry,
    client: Arc<dyn ModelProviderClient>,
    options: CompletionOptions,
}

impl AgentDispatcher {
    pub fn new(templates: TemplateRegistry, client: Arc<dyn ModelProviderClient>) -> Self {
        Self {
            templates,
            client,
            options: CompletionOptions::with_temperature(DEFAULT_TEMPERATURE),
        }
    }

    /// Fill unset generation options (max tokens, top-p) from `defaults`.
    /// The dispatch temperature is kept.
    pub fn with_default_options(mut self, defaults: &CompletionOptions) -> Self {
        self.options = self.options.or(defaults);
        self
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn options(&self) -> &CompletionOptions {
        &self.options
    }

    pub fn client(&self) -> &dyn ModelProviderClient {
        self.client.as_ref()
    }

    /// Run `mode` on `user_input` and return the best-effort JSON string.
    ///
    /// Fails with [`ApiError::UnknownMode`] before any oracle call when the
    /// mode is not recognized. Oracle failures are returned unchanged.
    pub async fn run(&self, mode: &str, user_input: &str) -> Result<String, ApiError> {
        let mode: Mode = mode.parse()?;
        self.run_mode(mode, user_input).await
    }

    pub async fn run_mode(&self, mode: Mode, user_input: &str) -> Result<String, ApiError> {
        let template = self.templates.get(mode);
        let prompt = TemplateRegistry::render(template, user_input);
        tracing::debug!(
            mode = %mode,
            provider = self.client.provider_name(),
            model = self.client.model(),
            prompt_chars = prompt.len(),
            "Dispatching prompt"
        );

        let raw = self.client.complete(&prompt, &self.options).await?;
        let extracted = extract_json(&raw);
        tracing::debug!(
            mode = %mode,
            raw_chars = raw.len(),
            extracted_chars = extracted.len(),
            "Extracted payload"
        );
        Ok(extracted)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{FailingClient, StubClient};
    use super::*;
    use crate::error::ProviderError;

    fn dispatcher(client: Arc<dyn ModelProviderClient>) -> AgentDispatcher {
        AgentDispatcher::new(TemplateRegistry::new(), client)
    }

    #[tokio::test]
    async fn sends_rendered_prompt_at_low_temperature() {
        let stub = Arc::new(StubClient::replying("{}"));
        let d = dispatcher(stub.clone());

        d.run("process_doc", "Wear PPE. Start press.").await.unwrap();

        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].0.contains("Wear PPE. Start press."));
        assert!(seen[0].0.contains("\"sop_title\""));
        assert_eq!(seen[0].1.temperature, Some(0.2));
    }

    #[tokio::test]
    async fn fenced_reply_is_extracted() {
        let d = dispatcher(Arc::new(StubClient::replying(
            "```json\n{\"summary\": \"ok\"}\n```",
        )));
        let out = d.run("troubleshoot", "x").await.unwrap();
        assert_eq!(out, r#"{"summary": "ok"}"#);
    }

    #[tokio::test]
    async fn empty_reply_yields_empty_string() {
        let d = dispatcher(Arc::new(StubClient::replying("")));
        assert_eq!(d.run("defect_report", "Scratch: 42").await.unwrap(), "");
    }

    #[tokio::test]
    async fn unknown_mode_fails_before_calling_the_oracle() {
        let stub = Arc::new(StubClient::replying("{}"));
        let d = dispatcher(stub.clone());
        let err = d.run("forecast", "x").await.unwrap_err();
        match err {
            ApiError::UnknownMode { valid, .. } => {
                assert_eq!(valid, vec!["troubleshoot", "process_doc", "defect_report"]);
            }
            other => panic!("expected unknown mode, got {:?}", other),
        }
        assert!(stub.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn oracle_errors_propagate_unchanged() {
        let d = dispatcher(Arc::new(FailingClient(429)));
        let err = d.run("troubleshoot", "x").await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Provider(ProviderError::QuotaExceeded { .. })
        ));
        assert!(err.is_quota_or_rate_limit());
    }

    #[tokio::test]
    async fn defaults_fill_options_but_keep_temperature() {
        let stub = Arc::new(StubClient::replying("{}"));
        let defaults = CompletionOptions {
            temperature: Some(1.0),
            max_tokens: Some(1024),
            top_p: Some(0.9),
        };
        let d = dispatcher(stub.clone()).with_default_options(&defaults);
        d.run("troubleshoot", "x").await.unwrap();
        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen[0].1.temperature, Some(0.2));
        assert_eq!(seen[0].1.max_tokens, Some(1024));
        assert_eq!(seen[0].1.top_p, Some(0.9));
    }
}
