//! JSON payload extraction from raw model replies.
//!
//! Models asked for "JSON only" still wrap answers in code fences or prose.
//! [`extract_json`] is a best-effort cleanup, not a parser: it strips fences
//! and keeps the span from the first `{` to the last `}`. Brace balance,
//! nesting and escapes are not checked, so two separate objects in one reply
//! come back as a single span covering both and the text between them.

use regex::Regex;
use std::sync::OnceLock;

fn leading_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^```(?:json)?\s*").expect("valid leading fence regex"))
}

fn trailing_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*```$").expect("valid trailing fence regex"))
}

fn brace_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("valid brace block regex"))
}

/// Remove surrounding whitespace and an optional markdown code fence.
pub fn strip_code_fence(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_lead = leading_fence().replace(trimmed, "");
    trailing_fence().replace(&without_lead, "").into_owned()
}

/// Recover the JSON-shaped part of a model reply.
///
/// Returns the greedy first-`{`-to-last-`}` span, trimmed, or the
/// fence-stripped text unchanged when there is no such span.
pub fn extract_json(raw: &str) -> String {
    let cleaned = strip_code_fence(raw);
    match brace_block().find(&cleaned) {
        Some(block) => block.as_str().trim().to_string(),
        None => cleaned,
    }
}
