use crate::error::{Result, StoryforgeError};
use serde_json::Value;

/// Maximum number of characters of raw text carried in a
/// [`MalformedOutput`](StoryforgeError::MalformedOutput) preview.
pub const PREVIEW_LIMIT: usize = 400;

/// Recover a JSON object from raw model output.
///
/// Strategy, in order:
/// 1. Strict parse of the trimmed text; accepted only when the result is a
///    JSON object.
/// 2. Parse the substring from the first `{` to the last `}` (inclusive),
///    when both exist and the first precedes the last. Model replies often
///    wrap the object in prose or code fences; this recovers that case.
///
/// Anything else fails with `MalformedOutput` carrying a truncated preview
/// of the offending text.
///
/// Texts containing several independent JSON objects parse the outermost
/// span, which merges unrelated braces and therefore fails; that is the
/// intended behavior, not a recovery target.
pub fn extract_json(raw: &str) -> Result<Value> {
    let trimmed = raw.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if value.is_object() {
            return Ok(value);
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<Value>(&trimmed[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(StoryforgeError::MalformedOutput {
        reason: "no parseable JSON object found".to_string(),
        preview: truncate_preview(raw, PREVIEW_LIMIT),
    })
}

/// Truncate text for error previews, counting characters so multi-byte
/// input never splits mid-codepoint.
pub fn truncate_preview(text: &str, max_len: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_len {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(max_len).collect();
        format!("{}...", cut)
    }
}
