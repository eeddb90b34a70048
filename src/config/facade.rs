//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::CopilotConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file, `<work_dir>/copilot.toml` and
    /// the environment.
    pub fn load(work_dir: &Path) -> Result<CopilotConfig, ApiError> {
        let mut config = MergeService::load(work_dir)?;
        config.base_dir = Some(work_dir.to_path_buf());
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<CopilotConfig, ApiError> {
        let mut config = MergeService::load_from_file(path)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Create default configuration.
    pub fn default() -> CopilotConfig {
        CopilotConfig::default()
    }

    fn validate(config: &CopilotConfig) -> Result<(), ApiError> {
        config
            .provider
            .validate()
            .map_err(|e| ApiError::ConfigError(format!("[provider] {}", e)))
    }
}
