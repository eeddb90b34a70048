//! Prompt templates and the template registry.
//!
//! Every mode has one template: a role framing, behavioral rules, the
//! `{user_input}` placeholder and a JSON skeleton of the expected answer. The
//! built-in templates can be replaced per mode from files named in the
//! `[prompts]` config section; replacements are read once when the registry is
//! built and never change afterwards.

use crate::agent::mode::Mode;
use crate::config::PromptsConfig;
use crate::error::ApiError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Placeholder substituted with the caller's input.
pub const USER_INPUT_PLACEHOLDER: &str = "{user_input}";

pub const TROUBLESHOOT_PROMPT: &str = r#"
You are a manufacturing troubleshooting agent.
Your job: help operators/engineers troubleshoot issues safely and quickly.

Rules:
- Return ONLY valid JSON (no markdown, no backticks).
- Be conservative: if uncertain, say so.
- Include safety notes (lockout-tagout, PPE) where relevant.
- Avoid hallucinating exact machine specs; use assumptions explicitly.

User input:
{user_input}

Return JSON with this exact schema:
{
  "summary": "1-2 sentences",
  "probable_causes": [
    {"cause": "string", "confidence": 0.0, "why": "string"}
  ],
  "diagnostic_steps": ["string"],
  "actions": {
    "immediate": ["string"],
    "long_term": ["string"]
  },
  "risks_and_safety": ["string"],
  "assumptions": ["string"]
}
"#;

pub const PROCESS_DOC_PROMPT: &str = r#"
You are a process documentation assistant for manufacturing.
Transform rough notes into a clean SOP suitable for shopfloor use.

Rules:
- Return ONLY valid JSON (no markdown, no backticks).
- Keep steps short, unambiguous, and numbered.
- Include PPE, quality checks, and stop conditions.

User input:
{user_input}

Return JSON with this exact schema:
{
  "sop_title": "string",
  "purpose": "string",
  "required_tools_ppe": ["string"],
  "steps": [
    {"step_no": 1, "instruction": "string", "critical_point": "string"}
  ],
  "checklist": ["string"],
  "stop_conditions": ["string"],
  "common_mistakes": ["string"]
}
"#;

pub const DEFECT_REPORT_PROMPT: &str = r#"
You are a quality engineering assistant.
Given defect counts + context, generate a short defect analysis report.

Rules:
- Return ONLY valid JSON (no markdown, no backticks).
- Be realistic: suggest actions and experiments, but don't invent data.
- Use Pareto thinking (focus on highest contributors).

User input:
{user_input}

Return JSON with this exact schema:
{
  "executive_summary": "string",
  "top_defects": [
    {"defect": "string", "share_estimate": "string", "note": "string"}
  ],
  "likely_causes": ["string"],
  "containment_actions": ["string"],
  "recommended_experiments": ["string"],
  "data_gaps": ["string"]
}
"#;

/// Where a template's text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    BuiltIn,
    File(PathBuf),
}

/// Immutable prompt template for one mode.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    mode: Mode,
    text: String,
    source: TemplateSource,
}

impl PromptTemplate {
    fn built_in(mode: Mode) -> Self {
        let text = match mode {
            Mode::Troubleshoot => TROUBLESHOOT_PROMPT,
            Mode::ProcessDoc => PROCESS_DOC_PROMPT,
            Mode::DefectReport => DEFECT_REPORT_PROMPT,
        };
        Self {
            mode,
            text: text.to_string(),
            source: TemplateSource::BuiltIn,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Substitute the placeholder with `user_input`, verbatim.
    ///
    /// Only the first placeholder is replaced, so input that itself contains
    /// `{user_input}` is left alone.
    pub fn render(&self, user_input: &str) -> String {
        self.text.replacen(USER_INPUT_PLACEHOLDER, user_input, 1)
    }
}

/// Fixed mapping from mode to template.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: HashMap<Mode, PromptTemplate>,
}

impl TemplateRegistry {
    /// Registry holding the built-in templates.
    pub fn new() -> Self {
        let templates = Mode::ALL
            .into_iter()
            .map(|mode| (mode, PromptTemplate::built_in(mode)))
            .collect();
        Self { templates }
    }

    /// Registry with per-mode file overrides applied.
    ///
    /// Relative override paths resolve against `base_dir`.
    pub fn from_config(prompts: &PromptsConfig, base_dir: &Path) -> Result<Self, ApiError> {
        let mut registry = Self::new();
        for mode in Mode::ALL {
            let Some(path) = prompts.path_for(mode) else {
                continue;
            };
            let resolved = resolve_prompt_path(path, base_dir)?;
            let text = load_prompt_file(&resolved)?;
            tracing::debug!(mode = %mode, path = %resolved.display(), "Loaded template override");
            registry.templates.insert(
                mode,
                PromptTemplate {
                    mode,
                    text,
                    source: TemplateSource::File(resolved),
                },
            );
        }
        Ok(registry)
    }

    /// Look up a template by mode identifier.
    pub fn resolve(&self, mode: &str) -> Result<&PromptTemplate, ApiError> {
        let mode: Mode = mode.parse()?;
        Ok(self.get(mode))
    }

    pub fn get(&self, mode: Mode) -> &PromptTemplate {
        // Every mode is inserted at construction.
        &self.templates[&mode]
    }

    pub fn render(template: &PromptTemplate, user_input: &str) -> String {
        template.render(user_input)
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve prompt file path with support for absolute, tilde, and relative paths
///
/// Path resolution priority:
/// 1. Absolute path (if starts with `/`)
/// 2. Tilde expansion (if starts with `~/`)
/// 3. Relative to current directory (if starts with `./`)
/// 4. Relative to base_dir
pub fn resolve_prompt_path(path: &str, base_dir: &Path) -> Result<PathBuf, ApiError> {
    if path.starts_with('/') {
        return Ok(PathBuf::from(path));
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let home =
            std::env::var("HOME").map_err(|_| ApiError::ConfigError("HOME not set".to_string()))?;
        return Ok(PathBuf::from(home).join(rest));
    }
    if let Some(rest) = path.strip_prefix("./") {
        let current_dir = std::env::current_dir().map_err(|e| {
            ApiError::ConfigError(format!("Failed to get current directory: {}", e))
        })?;
        return Ok(current_dir.join(rest));
    }
    Ok(base_dir.join(path))
}

/// Read a template override; it must be non-empty and carry the placeholder.
pub fn load_prompt_file(path: &Path) -> Result<String, ApiError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ApiError::ConfigError(format!(
            "Failed to read prompt file {}: {}",
            path.display(),
            e
        ))
    })?;
    if content.trim().is_empty() {
        return Err(ApiError::ConfigError(format!(
            "Prompt file {} is empty",
            path.display()
        )));
    }
    if !content.contains(USER_INPUT_PLACEHOLDER) {
        return Err(ApiError::ConfigError(format!(
            "Prompt file {} has no {} placeholder",
            path.display(),
            USER_INPUT_PLACEHOLDER
        )));
    }
    Ok(content)
}
