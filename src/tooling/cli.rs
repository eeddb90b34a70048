//! CLI Tooling
//!
//! Command-line interface for the manufacturing copilot. Every command returns
//! its stdout text from [`CliContext::execute`]; the binary prints it.

use crate::agent::{AgentDispatcher, Mode, TemplateRegistry, DEFAULT_TEMPERATURE};
use crate::config::{ConfigLoader, CopilotConfig};
use crate::demo::{demo_output, example_input};
use crate::error::ApiError;
use crate::eval::{builtin_cases, load_cases, EvalReport, EvalRunner};
use crate::logging::LoggingConfig;
use crate::provider::{
    CompletionOptions, DefaultClientResolver, ProviderClientResolver, ProviderDiagnosticsService,
};
use crate::tooling::format::{
    format_check_text, format_eval_report_text, format_modes_text, format_payload_text,
    source_label,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Printed after quota or rate-limit failures.
pub const DEMO_MODE_HINT: &str =
    "Hint: the provider rejected the request for quota or rate limits. Re-run with --demo to use the built-in sample output.";

/// Diagnostic shown when the model output does not parse as JSON.
pub const INVALID_JSON_NOTICE: &str = "Model output was not valid JSON";

/// Manufacturing Copilot CLI
#[derive(Parser)]
#[command(name = "copilot")]
#[command(
    about = "LLM copilot for manufacturing troubleshooting, SOP drafting and defect analysis"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Working directory (holds copilot.toml, .env and relative paths)
    #[arg(long, default_value = ".")]
    pub workdir: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold the logging flags into the configured logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut logging = base.clone();
        if self.verbose {
            logging.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
        logging
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one mode and print the structured result
    Run {
        /// Mode name (troubleshoot, process_doc, defect_report)
        mode: String,
        /// Input text (defaults to the mode's example input)
        #[arg(long, conflicts_with = "input_file")]
        input: Option<String>,
        /// Read the input text from a file
        #[arg(long)]
        input_file: Option<PathBuf>,
        /// Return the built-in sample output without calling the model
        #[arg(long)]
        demo: bool,
        /// Print the extracted model output without parsing it
        #[arg(long)]
        raw: bool,
        /// Output format (json or text)
        #[arg(long, default_value = "json")]
        format: String,
    },
    /// Interactive session: pick a mode, edit the input, view the result
    Interactive {
        /// Start with demo mode off
        #[arg(long)]
        live: bool,
    },
    /// List the available modes
    Modes {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the rendered prompt for a mode without calling the model
    Prompt {
        /// Mode name
        mode: String,
        /// Input text (defaults to the mode's example input)
        #[arg(long)]
        input: Option<String>,
    },
    /// Run the evaluation cases against the configured model
    Eval {
        /// Case file (defaults to [eval].cases)
        #[arg(long, conflicts_with = "builtin")]
        cases: Option<PathBuf>,
        /// Use one built-in case per mode instead of a case file
        #[arg(long)]
        builtin: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate provider configuration and credentials
    Check {
        /// Send a smoke-test prompt to the provider
        #[arg(long)]
        test_connectivity: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Row of `modes --format json`.
#[derive(Debug, Serialize)]
pub struct ModeEntry {
    pub name: &'static str,
    pub label: &'static str,
    pub template: String,
    pub schema_keys: &'static [&'static str],
}

/// CLI context holding loaded configuration and templates.
pub struct CliContext {
    work_dir: PathBuf,
    config: CopilotConfig,
    templates: TemplateRegistry,
    resolver: Arc<dyn ProviderClientResolver>,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(work_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(cfg_path) = &config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&work_dir)?
        };
        Self::from_config(work_dir, config)
    }

    /// Create a context from an already loaded configuration.
    pub fn from_config(work_dir: PathBuf, config: CopilotConfig) -> Result<Self, ApiError> {
        let base_dir = config
            .base_dir
            .clone()
            .unwrap_or_else(|| work_dir.clone());
        let templates = TemplateRegistry::from_config(&config.prompts, &base_dir)?;
        Ok(Self {
            work_dir,
            config,
            templates,
            resolver: Arc::new(DefaultClientResolver),
        })
    }

    /// Replace the client resolver (tests inject stub oracles here).
    pub fn with_resolver(mut self, resolver: Arc<dyn ProviderClientResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn config(&self) -> &CopilotConfig {
        &self.config
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Run {
                mode,
                input,
                input_file,
                demo,
                raw,
                format,
            } => {
                let mode: Mode = mode.parse()?;
                let input = self.resolve_input(mode, input.as_deref(), input_file.as_deref())?;
                self.handle_run(mode, &input, *demo, *raw, format)
            }
            Commands::Interactive { live } => self.handle_interactive(!*live),
            Commands::Modes { format } => self.handle_modes(format),
            Commands::Prompt { mode, input } => {
                let template = self.templates.resolve(mode)?;
                let input = input
                    .as_deref()
                    .unwrap_or_else(|| example_input(template.mode()));
                Ok(TemplateRegistry::render(template, input))
            }
            Commands::Eval {
                cases,
                builtin,
                format,
            } => self.handle_eval(cases.as_deref(), *builtin, format),
            Commands::Check {
                test_connectivity,
                format,
            } => self.handle_check(*test_connectivity, format),
        }
    }

    fn resolve_input(
        &self,
        mode: Mode,
        input: Option<&str>,
        input_file: Option<&Path>,
    ) -> Result<String, ApiError> {
        if let Some(text) = input {
            return Ok(text.to_string());
        }
        if let Some(path) = input_file {
            let path = self.resolve_path(path);
            return std::fs::read_to_string(&path).map_err(|e| {
                ApiError::ConfigError(format!(
                    "Failed to read input file {}: {}",
                    path.display(),
                    e
                ))
            });
        }
        Ok(example_input(mode).to_string())
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.work_dir.join(path)
        }
    }

    /// Build a dispatcher around a freshly resolved client.
    fn dispatcher(&self) -> Result<AgentDispatcher, ApiError> {
        let client = self.resolver.create_client(&self.config.provider)?;
        Ok(AgentDispatcher::new(self.templates.clone(), client)
            .with_default_options(&self.config.provider.default_options))
    }

    /// Run `future` to completion on a fresh runtime.
    fn block_on<F: Future>(&self, future: F) -> Result<F::Output, ApiError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(ApiError::ConfigError(
                "Cannot run a blocking command from within an async runtime".to_string(),
            ));
        }
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| ApiError::ConfigError(format!("Failed to create runtime: {}", e)))?;
        Ok(rt.block_on(future))
    }

    fn handle_run(
        &self,
        mode: Mode,
        input: &str,
        demo: bool,
        raw: bool,
        format: &str,
    ) -> Result<String, ApiError> {
        let output = if demo {
            tracing::info!(mode = %mode, "Returning demo output");
            render_json(&demo_output(mode))?
        } else {
            let dispatcher = self.dispatcher()?;
            self.block_on(dispatcher.run_mode(mode, input))??
        };
        if raw {
            return Ok(output);
        }
        Ok(render_output(mode, &output, format))
    }

    fn handle_modes(&self, format: &str) -> Result<String, ApiError> {
        if format == "json" {
            let entries: Vec<ModeEntry> = Mode::ALL
                .into_iter()
                .map(|mode| ModeEntry {
                    name: mode.as_str(),
                    label: mode.label(),
                    template: source_label(self.templates.get(mode).source()),
                    schema_keys: mode.schema_keys(),
                })
                .collect();
            return render_json(&entries);
        }
        Ok(format_modes_text(&self.templates))
    }

    fn handle_eval(
        &self,
        cases_path: Option<&Path>,
        builtin: bool,
        format: &str,
    ) -> Result<String, ApiError> {
        let cases = if builtin {
            builtin_cases()
        } else {
            let path = self.resolve_path(cases_path.unwrap_or(self.config.eval.cases.as_path()));
            load_cases(&path)?
        };
        tracing::info!(cases = cases.len(), "Starting evaluation");

        let dispatcher = self.dispatcher()?;
        let runner = EvalRunner::new(
            &dispatcher,
            dispatcher.client().provider_name(),
            dispatcher.client().model(),
        );
        let report: EvalReport = self.block_on(runner.run(&cases))?;
        tracing::info!(
            passed = report.passed,
            total = report.total,
            "Evaluation finished"
        );

        if format == "json" {
            return render_json(&report);
        }
        Ok(format_eval_report_text(&report))
    }

    fn handle_check(&self, test_connectivity: bool, format: &str) -> Result<String, ApiError> {
        let provider = &self.config.provider;
        let validation = ProviderDiagnosticsService::validate_provider(provider);
        let key_status = ProviderDiagnosticsService::resolve_api_key_status(provider);

        let smoke = if test_connectivity && validation.is_valid() {
            let client = self.resolver.create_client(provider)?;
            let options = self.dispatcher_options();
            Some(self.block_on(ProviderDiagnosticsService::smoke_test(
                client.as_ref(),
                &options,
            ))??)
        } else {
            if test_connectivity {
                tracing::warn!("Skipping connectivity test: provider configuration is invalid");
            }
            None
        };

        if format == "json" {
            return render_json(&json!({
                "validation": validation,
                "model": provider.model,
                "api_key": key_status,
                "valid": validation.is_valid(),
                "connectivity": smoke,
            }));
        }
        Ok(format_check_text(
            &validation,
            &provider.model,
            &key_status,
            smoke.as_ref(),
        ))
    }

    fn dispatcher_options(&self) -> CompletionOptions {
        CompletionOptions::with_temperature(DEFAULT_TEMPERATURE)
            .or(&self.config.provider.default_options)
    }

    /// Loop: select a mode, edit the input, run it, show the result.
    fn handle_interactive(&self, demo_default: bool) -> Result<String, ApiError> {
        use dialoguer::{Confirm, Input, Select};

        let mut items: Vec<&str> = Mode::ALL.iter().map(|m| m.label()).collect();
        items.push("Quit");
        let mut demo = demo_default;
        let mut runs = 0usize;

        loop {
            let selection = Select::new()
                .with_prompt("Mode")
                .items(&items)
                .default(0)
                .interact()
                .map_err(input_error)?;
            let Some(mode) = Mode::ALL.get(selection).copied() else {
                break;
            };

            let input: String = Input::new()
                .with_prompt("Input")
                .with_initial_text(example_input(mode))
                .interact_text()
                .map_err(input_error)?;

            demo = Confirm::new()
                .with_prompt("Demo mode (no API call)?")
                .default(demo)
                .interact()
                .map_err(input_error)?;

            match self.handle_run(mode, &input, demo, false, "json") {
                Ok(output) => println!("\n{}\n", output),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    if e.is_quota_or_rate_limit() {
                        eprintln!("Hint: switch demo mode on to keep going without the provider.");
                    }
                }
            }
            runs += 1;

            let again = Confirm::new()
                .with_prompt("Run another?")
                .default(true)
                .interact()
                .map_err(input_error)?;
            if !again {
                break;
            }
        }

        Ok(format!("Session finished after {} run(s).", runs))
    }
}

fn input_error(e: dialoguer::Error) -> ApiError {
    ApiError::ConfigError(format!("Failed to get user input: {}", e))
}

fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize output: {}", e)))
}

/// Pretty-print `output` when it parses as JSON, otherwise return it with a
/// notice. Unparseable output is data, not a failure.
pub fn render_output(mode: Mode, output: &str, format: &str) -> String {
    match serde_json::from_str::<Value>(output) {
        Ok(value) if format == "text" => format_payload_text(mode, &value),
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| output.to_string()),
        Err(e) => {
            tracing::warn!(mode = %mode, error = %e, "Model output did not parse as JSON");
            format!("{} ({}). Raw output:\n\n{}", INVALID_JSON_NOTICE, e, output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_json_is_pretty_printed() {
        let out = render_output(Mode::Troubleshoot, r#"{"summary":"x"}"#, "json");
        assert_eq!(out, "{\n  \"summary\": \"x\"\n}");
    }

    #[test]
    fn pretty_printing_keeps_model_key_order() {
        let reply = r#"{"summary":"s","probable_causes":[],"actions":{"immediate":[],"long_term":[]}}"#;
        let out = render_output(Mode::Troubleshoot, reply, "json");
        let summary = out.find("\"summary\"").unwrap();
        let causes = out.find("\"probable_causes\"").unwrap();
        let actions = out.find("\"actions\"").unwrap();
        assert!(summary < causes && causes < actions, "keys reordered:\n{}", out);
        assert!(out.find("\"immediate\"").unwrap() < out.find("\"long_term\"").unwrap());
    }

    #[test]
    fn demo_run_lists_keys_in_schema_order() {
        for mode in Mode::ALL {
            let out = render_json(&demo_output(mode)).unwrap();
            let positions: Vec<usize> = mode
                .schema_keys()
                .iter()
                .map(|key| out.find(&format!("\"{}\"", key)).unwrap())
                .collect();
            assert!(
                positions.windows(2).all(|w| w[0] < w[1]),
                "{} demo keys out of schema order",
                mode
            );
        }
        let troubleshoot = render_json(&demo_output(Mode::Troubleshoot)).unwrap();
        assert!(troubleshoot.starts_with("{\n  \"summary\""));
    }

    #[test]
    fn invalid_json_keeps_raw_text() {
        let out = render_output(Mode::DefectReport, "I cannot produce JSON", "json");
        assert!(out.starts_with(INVALID_JSON_NOTICE));
        assert!(out.ends_with("I cannot produce JSON"));
    }

    #[test]
    fn logging_flags_override_config() {
        let cli = Cli::try_parse_from([
            "copilot",
            "--verbose",
            "--log-format",
            "json",
            "modes",
        ])
        .unwrap();
        let logging = cli.logging_config(&LoggingConfig::default());
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, "json");
        assert_eq!(logging.output, "stderr");

        let cli = Cli::try_parse_from(["copilot", "--verbose", "--log-level", "trace", "modes"])
            .unwrap();
        assert_eq!(cli.logging_config(&LoggingConfig::default()).level, "trace");
    }
}
