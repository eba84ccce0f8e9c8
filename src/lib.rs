pub mod agents;
pub mod config;
pub mod error;
pub mod fallback;
pub mod files;
pub mod llm;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod spec;

#[cfg(test)]
pub mod test_support;

pub use config::LlmConfig;
pub use error::{Result, StoryforgeError};
pub use files::{FileSet, GeneratedFile};
pub use pipeline::{Pipeline, RunResult};
pub use spec::Specification;
