//! Test stage: a specification plus key sources in, a pytest suite out.

use super::{
    complete_structured, decode_stage_output, AgentProfile, StageOutcome, STAGE_TEMPERATURE,
};
use crate::error::{Result, StoryforgeError};
use crate::fallback::TESTS_FALLBACK;
use crate::files::{FileManifest, FileSet};
use crate::llm::ChatCompleter;
use crate::prompts::TEST_PROMPT;
use crate::spec::Specification;

/// Sources worth showing the test writer. Everything else (README, pinned
/// requirements) only wastes prompt space.
pub const KEY_CODE_FILES: [&str; 3] = ["app/main.py", "app/routes.py", "app/models.py"];

pub struct TestAgent {
    profile: AgentProfile,
    fallback: &'static str,
}

impl TestAgent {
    pub fn new() -> Self {
        Self {
            profile: AgentProfile {
                name: "tests",
                role: "QA Engineer",
                goal: "cover the generated service with a focused pytest suite",
                context: "You test HTTP APIs through FastAPI's TestClient, covering every \
                          endpoint plus the edge cases that matter. You answer with a \
                          single JSON object listing every test file.",
            },
            fallback: TESTS_FALLBACK,
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

    /// Makes the stage's single completion call with the specification and
    /// the key application sources inlined into the prompt.
    pub fn generate_tests<C: ChatCompleter>(
        &self,
        client: &C,
        spec: &Specification,
        code: &FileSet,
    ) -> Result<StageOutcome<FileSet>> {
        let key_files = code.subset(&KEY_CODE_FILES);
        let prompt = TEST_PROMPT
            .replace("{spec_json}", &spec.to_pretty_json()?)
            .replace("{key_files_json}", &key_files.to_pretty_json()?);

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

impl Default for TestAgent {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
