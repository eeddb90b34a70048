//! Tooling & Integration Layer
//!
//! Command-line front end over the agent dispatcher, the evaluation harness
//! and provider diagnostics.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
