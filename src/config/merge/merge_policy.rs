//! Built-in defaults applied beneath every other source.

use crate::config::DEFAULT_EVAL_CASES;
use crate::provider::profile::DEFAULT_GEMINI_MODEL;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Start a builder seeded with the defaults every config layer overrides.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("provider.provider_type", "gemini")?
        .set_default("provider.model", DEFAULT_GEMINI_MODEL)?
        .set_default("logging.level", "warn")?
        .set_default("logging.output", "stderr")?
        .set_default("eval.cases", DEFAULT_EVAL_CASES)
}
