//! Runs evaluation cases through the dispatcher.

use crate::agent::AgentDispatcher;
use crate::eval::cases::EvalCase;
use crate::eval::checks::{looks_like_json, missing_keys, preview};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

/// Result of one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseOutcome {
    Pass,
    /// Output does not start with `{` and end with `}`.
    NotJsonLike { preview: String },
    /// Output is JSON-shaped but lacks required keys.
    MissingKeys { keys: Vec<String>, preview: String },
    /// `run` failed (unknown mode, oracle error).
    Error { message: String },
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, CaseOutcome::Pass)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub index: usize,
    pub name: String,
    pub mode: String,
    pub elapsed_ms: u128,
    #[serde(flatten)]
    pub outcome: CaseOutcome,
}

/// Aggregate report over a case list.
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub generated_at: DateTime<Utc>,
    pub provider: String,
    pub model: String,
    pub passed: usize,
    pub total: usize,
    pub results: Vec<CaseResult>,
}

impl EvalReport {
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    pub fn summary_line(&self) -> String {
        format!("Result: {}/{} passed", self.passed, self.total)
    }
}

/// Check one dispatcher output against a case.
pub fn judge(output: &str, case: &EvalCase) -> CaseOutcome {
    if !looks_like_json(output) {
        return CaseOutcome::NotJsonLike {
            preview: preview(output),
        };
    }
    let missing = missing_keys(output, &case.must_have_keys);
    if !missing.is_empty() {
        return CaseOutcome::MissingKeys {
            keys: missing,
            preview: preview(output),
        };
    }
    CaseOutcome::Pass
}

/// Sequential evaluation runner.
pub struct EvalRunner<'a> {
    dispatcher: &'a AgentDispatcher,
    provider: String,
    model: String,
}

impl<'a> EvalRunner<'a> {
    pub fn new(dispatcher: &'a AgentDispatcher, provider: &str, model: &str) -> Self {
        Self {
            dispatcher,
            provider: provider.to_string(),
            model: model.to_string(),
        }
    }

    /// Run every case in order. A failing case is recorded and the run
    /// continues with the next one.
    pub async fn run(&self, cases: &[EvalCase]) -> EvalReport {
        let mut results = Vec::with_capacity(cases.len());
        for (i, case) in cases.iter().enumerate() {
            let started = Instant::now();
            let outcome = match self.dispatcher.run(&case.mode, &case.input).await {
                Ok(output) => judge(&output, case),
                Err(e) => CaseOutcome::Error {
                    message: e.to_string(),
                },
            };
            let elapsed_ms = started.elapsed().as_millis();
            if outcome.passed() {
                tracing::info!(case = %case.name, elapsed_ms, "Eval case passed");
            } else {
                tracing::warn!(case = %case.name, outcome = ?outcome, "Eval case failed");
            }
            results.push(CaseResult {
                index: i + 1,
                name: case.name.clone(),
                mode: case.mode.clone(),
                elapsed_ms,
                outcome,
            });
        }

        let passed = results.iter().filter(|r| r.outcome.passed()).count();
        EvalReport {
            generated_at: Utc::now(),
            provider: self.provider.clone(),
            model: self.model.clone(),
            passed,
            total: results.len(),
            results,
        }
    }
}
