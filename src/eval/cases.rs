//! Evaluation case files.

use crate::agent::Mode;
use crate::demo::example_input;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One evaluation case.
///
/// `mode` stays a string so a typo in the case file is reported per case
/// rather than failing the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalCase {
    pub name: String,
    pub mode: String,
    pub input: String,
    #[serde(default)]
    pub must_have_keys: Vec<String>,
}

/// Read a JSON array of cases.
pub fn load_cases(path: &Path) -> Result<Vec<EvalCase>, ApiError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ApiError::EvalError(format!(
            "Failed to read case file {}: {}",
            path.display(),
            e
        ))
    })?;
    let cases: Vec<EvalCase> = serde_json::from_str(&content).map_err(|e| {
        ApiError::EvalError(format!(
            "Failed to parse case file {}: {}",
            path.display(),
            e
        ))
    })?;
    if cases.is_empty() {
        return Err(ApiError::EvalError(format!(
            "Case file {} contains no cases",
            path.display()
        )));
    }
    Ok(cases)
}

/// One case per mode using the example inputs and the full schema key list.
pub fn builtin_cases() -> Vec<EvalCase> {
    Mode::ALL
        .into_iter()
        .map(|mode| EvalCase {
            name: format!("{} example", mode.label()),
            mode: mode.as_str().to_string(),
            input: example_input(mode).to_string(),
            must_have_keys: mode.schema_keys().iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}
