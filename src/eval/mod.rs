//! Evaluation harness
//!
//! Runs a list of cases against the live model and checks that each output
//! is JSON-shaped and names the required keys.

pub mod cases;
pub mod checks;
pub mod runner;

pub use cases::{builtin_cases, load_cases, EvalCase};
pub use checks::{looks_like_json, missing_keys};
pub use runner::{judge, CaseOutcome, CaseResult, EvalReport, EvalRunner};
