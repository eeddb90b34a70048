//! Provider configuration owned by the provider domain.

pub mod config;
pub mod validation;

pub use self::config::{ProviderConfig, ProviderType, DEFAULT_GEMINI_MODEL};
pub use validation::{provider_type_slug, ValidationResult};
