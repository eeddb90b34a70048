//! Error types for the copilot.
//!
//! `ApiError` is what every public operation returns. Oracle failures are kept
//! in their own `ProviderError` so callers can tell a quota rejection from a
//! misconfigured credential without string matching.

use thiserror::Error;

/// Failures reported by a text-completion provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider rejected the credential (HTTP 401/403).
    #[error("Authentication rejected by {provider} ({status}): {message}")]
    Authentication {
        provider: String,
        status: u16,
        message: String,
    },

    /// Too many requests (HTTP 429 without a quota marker).
    #[error("Rate limit exceeded at {provider}: {message}")]
    RateLimited { provider: String, message: String },

    /// Account or project quota exhausted (HTTP 429 mentioning quota).
    #[error("Quota exceeded at {provider}: {message}")]
    QuotaExceeded { provider: String, message: String },

    /// Any other non-success HTTP status.
    #[error("{provider} returned HTTP {status}: {body}")]
    Api {
        provider: String,
        status: u16,
        body: String,
    },

    /// Connection, TLS or timeout failure before a response arrived.
    #[error("Transport error talking to {provider}: {source}")]
    Transport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response arrived but its body could not be decoded.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse { provider: String, message: String },
}

impl ProviderError {
    /// True for the quota and rate-limit rejections that front ends answer
    /// with a "switch to demo mode" hint.
    pub fn is_quota_or_rate_limit(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited { .. } | ProviderError::QuotaExceeded { .. }
        )
    }
}

/// Main error type for copilot operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing credential, unreadable or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The caller named a mode that does not exist.
    #[error("Unknown mode: {mode}. Use one of: {}", format_modes(.valid))]
    UnknownMode {
        mode: String,
        valid: Vec<&'static str>,
    },

    /// The oracle call failed; passed through untouched.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Evaluation case file could not be loaded.
    #[error("Evaluation error: {0}")]
    EvalError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Returns the provider error when this failure came from the oracle.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            ApiError::Provider(e) => Some(e),
            _ => None,
        }
    }

    /// True when the oracle rejected the call for quota or rate reasons.
    pub fn is_quota_or_rate_limit(&self) -> bool {
        self.provider_error()
            .map(ProviderError::is_quota_or_rate_limit)
            .unwrap_or(false)
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

fn format_modes(valid: &[&'static str]) -> String {
    let quoted: Vec<String> = valid.iter().map(|m| format!("'{}'", m)).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_mode_message_lists_valid_modes() {
        let err = ApiError::UnknownMode {
            mode: "forecast".to_string(),
            valid: vec!["troubleshoot", "process_doc", "defect_report"],
        };
        assert_eq!(
            err.to_string(),
            "Unknown mode: forecast. Use one of: ['troubleshoot', 'process_doc', 'defect_report']"
        );
    }

    #[test]
    fn quota_and_rate_limit_are_flagged() {
        let quota = ApiError::from(ProviderError::QuotaExceeded {
            provider: "gemini".to_string(),
            message: "RESOURCE_EXHAUSTED".to_string(),
        });
        assert!(quota.is_quota_or_rate_limit());

        let rate = ProviderError::RateLimited {
            provider: "openai".to_string(),
            message: "slow down".to_string(),
        };
        assert!(rate.is_quota_or_rate_limit());

        let auth = ApiError::from(ProviderError::Authentication {
            provider: "gemini".to_string(),
            status: 401,
            message: "bad key".to_string(),
        });
        assert!(!auth.is_quota_or_rate_limit());
        assert!(!ApiError::ConfigError("x".to_string()).is_quota_or_rate_limit());
    }

    #[test]
    fn provider_error_passes_through_display() {
        let err = ApiError::from(ProviderError::Api {
            provider: "gemini".to_string(),
            status: 500,
            body: "internal".to_string(),
        });
        assert_eq!(err.to_string(), "gemini returned HTTP 500: internal");
    }
}
