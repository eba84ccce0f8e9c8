//! Stage agents for the generation pipeline.
//!
//! Each agent owns one pipeline stage and makes exactly one completion
//! call per run:
//!
//! - [`RequirementsAgent`] turns a user story into a `Specification`
//! - [`CodeAgent`] turns a specification into application sources
//! - [`TestAgent`] turns a specification plus key sources into a test suite
//!
//! When the completion endpoint fails, an agent substitutes its built-in
//! fallback response and reports the failure reason so callers can surface
//! the degraded stage. Malformed model output always propagates as an error.

pub mod codegen;
pub mod requirements;
pub mod testgen;

pub use codegen::CodeAgent;
pub use requirements::RequirementsAgent;
pub use testgen::TestAgent;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, StoryforgeError};
use crate::llm::{extract_json, truncate_preview, ChatCompleter, ChatMessage, PREVIEW_LIMIT};
use crate::prompts::JSON_OBJECT_DIRECTIVE;

/// Sampling temperature for every stage call. Low on purpose: stage answers
/// must stay machine-parseable.
pub const STAGE_TEMPERATURE: f32 = 0.2;

/// Identity block sent as the system message of a stage call.
#[derive(Debug, Clone)]
pub struct AgentProfile {
    pub name: &'static str,
    pub role: &'static str,
    pub goal: &'static str,
    pub context: &'static str,
}

impl AgentProfile {
    pub fn system_prompt(&self) -> String {
        format!(
            "You are a {}. Your goal: {}\n\n{}",
            self.role, self.goal, self.context
        )
    }
}

/// Result of one stage: the typed output plus, when the completion endpoint
/// failed and the built-in fallback was substituted, the failure reason.
#[derive(Debug, Clone)]
pub struct StageOutcome<T> {
    pub output: T,
    pub fallback_reason: Option<String>,
}

impl<T> StageOutcome<T> {
    pub fn is_degraded(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Runs one structured completion: sends the profile as the system message
/// and the prompt (with the JSON-only directive appended) as the user
/// message, then extracts the JSON object from the reply.
///
/// A failed completion degrades to `fallback`; a malformed reply does not.
fn complete_structured<C: ChatCompleter>(
    client: &C,
    profile: &AgentProfile,
    prompt: &str,
    fallback: &str,
    temperature: f32,
) -> Result<(Value, Option<String>)> {
    let user_prompt = format!("{prompt}\n\n{JSON_OBJECT_DIRECTIVE}");
    let conversation = [
        ChatMessage::system(profile.system_prompt()),
        ChatMessage::user(user_prompt),
    ];

    match client.complete(&conversation, temperature) {
        Ok(raw) => Ok((extract_json(&raw)?, None)),
        Err(StoryforgeError::CompletionFailed(reason)) => {
            let value = extract_json(fallback)?;
            Ok((value, Some(reason)))
        }
        Err(other) => Err(other),
    }
}

/// Decodes an extracted stage answer into its typed form. A schema mismatch
/// is malformed output, reported with a preview of the offending JSON.
fn decode_stage_output<T: DeserializeOwned>(stage: &str, value: Value) -> Result<T> {
    let preview = truncate_preview(&value.to_string(), PREVIEW_LIMIT);
    serde_json::from_value(value).map_err(|e| StoryforgeError::MalformedOutput {
        reason: format!("{stage} output does not match the expected schema: {e}"),
        preview,
    })
}

// ============================================================================
// Tests
// ============================================================================
