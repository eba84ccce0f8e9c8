//! Requirements stage: a user story in, a validated specification out.

use super::{
    complete_structured, decode_stage_output, AgentProfile, StageOutcome, STAGE_TEMPERATURE,
};
use crate::error::Result;
use crate::fallback::REQUIREMENTS_FALLBACK;
use crate::llm::ChatCompleter;
use crate::prompts::REQUIREMENTS_PROMPT;
use crate::spec::Specification;

pub struct RequirementsAgent {
    profile: AgentProfile,
    fallback: &'static str,
}

impl RequirementsAgent {
    pub fn new() -> Self {
        Self {
            profile: AgentProfile {
                name: "requirements",
                role: "Requirements Analyst",
                goal: "turn a user story into a precise, minimal software specification",
                context: "You specify small demo services. You pick the smallest design \
                          that satisfies the story and you answer with a single JSON object.",
            },
            fallback: REQUIREMENTS_FALLBACK,
        }
    }

    /// Replaces the built-in offline response.
    pub fn with_fallback(mut self, fallback: &'static str) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn name(&self) -> &'static str {
        self.profile.name
    }

    /// Makes the stage's single completion call and decodes the answer.
    /// Endpoint failure substitutes the fallback specification; an answer
    /// that does not decode or validate is an error.
    pub fn generate_spec<C: ChatCompleter>(
        &self,
        client: &C,
        user_story: &str,
    ) -> Result<StageOutcome<Specification>> {
        let prompt = REQUIREMENTS_PROMPT.replace("{user_story}", user_story);
        let (value, fallback_reason) = complete_structured(
            client,
            &self.profile,
            &prompt,
            self.fallback,
            STAGE_TEMPERATURE,
        )?;

        let spec: Specification = decode_stage_output(self.profile.name, value)?;
        spec.validate()?;

        Ok(StageOutcome {
            output: spec,
            fallback_reason,
        })
    }
}

impl Default for RequirementsAgent {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
