//! Code stage: a specification in, runnable application sources out.

use super::{
    complete_structured, decode_stage_output, AgentProfile, StageOutcome, STAGE_TEMPERATURE,
};
use crate::error::{Result, StoryforgeError};
use crate::fallback::CODE_FALLBACK;
use crate::files::{FileManifest, FileSet};
use crate::llm::ChatCompleter;
use crate::prompts::CODE_PROMPT;
use crate::spec::Specification;

pub struct CodeAgent {
    profile: AgentProfile,
    fallback: &'static str,
}

impl CodeAgent {
    pub fn new() -> Self {
        Self {
            profile: AgentProfile {
                name: "code",
                role: "Senior Python Developer",
                goal: "implement the given specification as a small, complete FastAPI service",
                context: "You write complete files, never fragments or placeholders. \
                          You answer with a single JSON object listing every file.",
            },
            fallback: CODE_FALLBACK,
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

    /// Makes the stage's single completion call and decodes the answer into
    /// a file set. An answer with no files is malformed.
    pub fn generate_files<C: ChatCompleter>(
        &self,
        client: &C,
        spec: &Specification,
    ) -> Result<StageOutcome<FileSet>> {
        let prompt = CODE_PROMPT.replace("{spec_json}", &spec.to_pretty_json()?);
        let (value, fallback_reason) = complete_structured(
            client,
            &self.profile,
            &prompt,
            self.fallback,
            STAGE_TEMPERATURE,
        )?;

        let manifest: FileManifest = decode_stage_output(self.profile.name, value)?;
        if manifest.files.is_empty() {
            return Err(StoryforgeError::MalformedOutput {
                reason: format!("{} output contains an empty file list", self.profile.name),
                preview: r#"{"files": []}"#.to_string(),
            });
        }

        Ok(StageOutcome {
            output: FileSet::from(manifest),
            fallback_reason,
        })
    }
}

impl Default for CodeAgent {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
