//! Manufacturing Copilot
//!
//! Mode-driven assistant for manufacturing work: a mode selects a prompt
//! template, the filled prompt goes to a text-completion provider, and the JSON
//! payload is recovered from the reply. Front ends live in [`tooling`]; the
//! evaluation harness in [`eval`].

pub mod agent;
pub mod config;
pub mod demo;
pub mod error;
pub mod eval;
pub mod logging;
pub mod provider;
pub mod tooling;
