//! Manufacturing agents
//!
//! A mode selects a prompt template; the dispatcher fills it, sends it to the
//! configured model provider and pulls the JSON payload out of the reply.

pub mod dispatcher;
pub mod extract;
pub mod mode;
pub mod prompt;

pub use dispatcher::{AgentDispatcher, DEFAULT_TEMPERATURE};
pub use extract::{extract_json, strip_code_fence};
pub use mode::Mode;
pub use prompt::{resolve_prompt_path, PromptTemplate, TemplateRegistry, TemplateSource};
