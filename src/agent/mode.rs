//! Agent modes.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task category selecting the template and output schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Fault diagnosis for equipment issues
    Troubleshoot,
    /// Rough notes to shopfloor SOP
    ProcessDoc,
    /// Defect counts to a short Pareto-style analysis
    DefectReport,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Troubleshoot, Mode::ProcessDoc, Mode::DefectReport];

    /// Identifier used on the command line and in case files.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Troubleshoot => "troubleshoot",
            Mode::ProcessDoc => "process_doc",
            Mode::DefectReport => "defect_report",
        }
    }

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Troubleshoot => "Troubleshooting",
            Mode::ProcessDoc => "Process Documentation",
            Mode::DefectReport => "Defect Report",
        }
    }

    /// Top-level keys of the JSON object the template asks for.
    pub fn schema_keys(self) -> &'static [&'static str] {
        match self {
            Mode::Troubleshoot => &[
                "summary",
                "probable_causes",
                "diagnostic_steps",
                "actions",
                "risks_and_safety",
                "assumptions",
            ],
            Mode::ProcessDoc => &[
                "sop_title",
                "purpose",
                "required_tools_ppe",
                "steps",
                "checklist",
                "stop_conditions",
                "common_mistakes",
            ],
            Mode::DefectReport => &[
                "executive_summary",
                "top_defects",
                "likely_causes",
                "containment_actions",
                "recommended_experiments",
                "data_gaps",
            ],
        }
    }

    pub fn valid_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|m| m.as_str()).collect()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ApiError::UnknownMode {
                mode: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}
