//! Textual output checks.
//!
//! These are heuristics over the returned string, not a JSON parse: a key
//! counts as present when `"key"` is followed by optional whitespace and a
//! colon anywhere in the text.

use regex::Regex;

/// Characters of output kept in failure previews.
pub const PREVIEW_CHARS: usize = 400;

/// Trimmed text starts with `{` and ends with `}`.
pub fn looks_like_json(text: &str) -> bool {
    let text = text.trim();
    text.starts_with('{') && text.ends_with('}')
}

/// Keys with no `"key"\s*:` occurrence in `text`, in input order.
pub fn missing_keys(text: &str, keys: &[String]) -> Vec<String> {
    keys.iter()
        .filter(|key| !key_pattern(key).is_match(text))
        .cloned()
        .collect()
}

/// `"<key>"` then optional whitespace and a colon; the key is matched literally.
fn key_pattern(key: &str) -> Regex {
    Regex::new(&format!(r#""{}"\s*:"#, regex::escape(key))).expect("valid escaped key regex")
}

/// First [`PREVIEW_CHARS`] characters of `text`.
pub fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}
