//! Sequential three-stage pipeline: requirements, code, tests.
//!
//! Stages run in order, each output feeding the next, and artifacts are
//! persisted as soon as their stage finishes. A failing stage aborts the
//! run but never rolls back what earlier stages already wrote.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use crate::agents::{CodeAgent, RequirementsAgent, StageOutcome, TestAgent};
use crate::error::Result;
use crate::llm::ChatCompleter;
use crate::output::{
    print_info, print_specification, print_stage_banner, print_warning, print_written_files,
    BannerColor,
};
use crate::progress::{format_elapsed, StageSpinner};
use crate::spec::Specification;

/// File name the requirements stage output is persisted under, inside the
/// project root.
pub const SPEC_FILE_NAME: &str = "specification.json";

/// Everything a completed run produced, with written paths in the order
/// the stages reported them.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub spec: Specification,
    pub code_paths: Vec<String>,
    pub test_paths: Vec<String>,
    pub degraded_stages: Vec<String>,
}

impl RunResult {
    pub fn is_degraded(&self) -> bool {
        !self.degraded_stages.is_empty()
    }
}

pub struct Pipeline<C: ChatCompleter> {
    client: C,
    project_root: PathBuf,
    requirements: RequirementsAgent,
    code: CodeAgent,
    tests: TestAgent,
    verbose: bool,
}

impl<C: ChatCompleter> Pipeline<C> {
    pub fn new(client: C, project_root: impl Into<PathBuf>) -> Self {
        Self {
            client,
            project_root: project_root.into(),
            requirements: RequirementsAgent::new(),
            code: CodeAgent::new(),
            tests: TestAgent::new(),
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Runs the full pipeline for one user story.
    ///
    /// The specification is saved before code generation starts and code
    /// files are written before test generation starts, so partial output
    /// survives a later failure.
    pub fn run(&self, user_story: &str) -> Result<RunResult> {
        let mut degraded_stages = Vec::new();

        let outcome = self.run_stage("REQUIREMENTS", || {
            self.requirements.generate_spec(&self.client, user_story)
        })?;
        let StageOutcome {
            output: spec,
            fallback_reason,
        } = outcome;
        self.note_degraded(&mut degraded_stages, self.requirements.name(), fallback_reason);

        fs::create_dir_all(&self.project_root)?;
        let spec_path = self.project_root.join(SPEC_FILE_NAME);
        spec.save(&spec_path)?;
        print_info(&format!("Specification saved to {}", spec_path.display()));
        print_specification(&spec.to_pretty_json()?);

        let outcome = self.run_stage("CODE GENERATION", || {
            self.code.generate_files(&self.client, &spec)
        })?;
        let StageOutcome {
            output: code_files,
            fallback_reason,
        } = outcome;
        self.note_degraded(&mut degraded_stages, self.code.name(), fallback_reason);

        let code_paths = code_files.write_all(&self.project_root)?;
        print_written_files("Application files", &code_paths);

        let outcome = self.run_stage("TEST GENERATION", || {
            self.tests.generate_tests(&self.client, &spec, &code_files)
        })?;
        let StageOutcome {
            output: test_files,
            fallback_reason,
        } = outcome;
        self.note_degraded(&mut degraded_stages, self.tests.name(), fallback_reason);

        let test_paths = test_files.write_all(&self.project_root)?;
        print_written_files("Test files", &test_paths);

        Ok(RunResult {
            spec,
            code_paths,
            test_paths,
            degraded_stages,
        })
    }

    /// Runs one stage behind a banner and a spinner (or plain timing lines
    /// in verbose mode, where the spinner would swallow detail output).
    fn run_stage<T>(
        &self,
        label: &str,
        stage: impl FnOnce() -> Result<StageOutcome<T>>,
    ) -> Result<StageOutcome<T>> {
        print_stage_banner(label, BannerColor::Cyan);

        if self.verbose {
            let started = Instant::now();
            let outcome = stage()?;
            print_info(&format!(
                "{label} finished in {}",
                format_elapsed(started.elapsed())
            ));
            Ok(outcome)
        } else {
            let mut spinner = StageSpinner::new(label);
            match stage() {
                Ok(outcome) => {
                    spinner.finish_success();
                    Ok(outcome)
                }
                Err(e) => {
                    spinner.finish_error(&e.to_string());
                    Err(e)
                }
            }
        }
    }

    fn note_degraded(
        &self,
        degraded_stages: &mut Vec<String>,
        stage_name: &str,
        fallback_reason: Option<String>,
    ) {
        if let Some(reason) = fallback_reason {
            print_warning(&format!(
                "{stage_name} stage degraded to its built-in fallback: {reason}"
            ));
            degraded_stages.push(stage_name.to_string());
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
