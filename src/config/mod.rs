//! Configuration
//!
//! Layered configuration built with the `config` crate: built-in defaults, the
//! global `config.toml`, a local `copilot.toml`, then `COPILOT_*` environment
//! variables. See [`ConfigLoader`].

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::agent::Mode;
use crate::logging::LoggingConfig;
use crate::provider::ProviderConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the working-directory config file.
pub const LOCAL_CONFIG_FILE: &str = "copilot.toml";

/// Default location of the evaluation case file.
pub const DEFAULT_EVAL_CASES: &str = "eval/test_cases.json";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CopilotConfig {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub prompts: PromptsConfig,

    #[serde(default)]
    pub eval: EvalConfig,

    /// Directory relative prompt paths resolve against. Set by the loader.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Optional per-mode template files replacing the built-in templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub troubleshoot: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_doc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defect_report: Option<String>,
}

impl PromptsConfig {
    pub fn path_for(&self, mode: Mode) -> Option<&str> {
        match mode {
            Mode::Troubleshoot => self.troubleshoot.as_deref(),
            Mode::ProcessDoc => self.process_doc.as_deref(),
            Mode::DefectReport => self.defect_report.as_deref(),
        }
    }
}

/// Evaluation harness settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Case file used when `eval` runs without `--cases`.
    #[serde(default = "default_cases_path")]
    pub cases: PathBuf,
}

fn default_cases_path() -> PathBuf {
    PathBuf::from(DEFAULT_EVAL_CASES)
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            cases: default_cases_path(),
        }
    }
}
