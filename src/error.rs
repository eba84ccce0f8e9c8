use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoryforgeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Completion request failed: {0}")]
    CompletionFailed(String),

    #[error("Malformed model output ({reason}): {preview}")]
    MalformedOutput { reason: String, preview: String },

    #[error("Unsafe generated path: {0}")]
    UnsafePath(String),

    #[error("Story file not found: {0}")]
    StoryFileNotFound(std::path::PathBuf),

    #[error("User story is empty")]
    EmptyStory,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoryforgeError>;
