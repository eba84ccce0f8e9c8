use crate::error::{Result, StoryforgeError};
use std::env;

/// Environment variable holding the completion endpoint base URL.
pub const ENV_API_BASE_URL: &str = "STORYFORGE_API_BASE_URL";
/// Environment variable holding the bearer credential.
pub const ENV_API_KEY: &str = "STORYFORGE_API_KEY";
/// Environment variable overriding the model identifier.
pub const ENV_MODEL: &str = "STORYFORGE_MODEL";
/// Environment variable overriding the per-call timeout (seconds).
pub const ENV_TIMEOUT_SECS: &str = "STORYFORGE_TIMEOUT_SECS";
/// Environment variable overriding the retry count.
pub const ENV_MAX_RETRIES: &str = "STORYFORGE_MAX_RETRIES";

/// Model used when `STORYFORGE_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Per-call HTTP timeout used when `STORYFORGE_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;
/// Retries after the first attempt when `STORYFORGE_MAX_RETRIES` is not set.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Settings for talking to the chat-completion endpoint.
///
/// Constructed once at process start from the environment and passed by
/// reference into [`ChatClient::new`](crate::llm::ChatClient::new). Nothing
/// deeper in the crate reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    /// Base URL of the completion endpoint (the `/chat/completions` path is
    /// appended by the client).
    pub base_url: String,
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Model identifier sent in the request body.
    pub model: String,
    /// Per-call HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Retries after the first attempt before a call is declared failed.
    pub max_retries: u32,
}

impl LlmConfig {
    /// Read and validate the configuration from process environment variables.
    ///
    /// Fails with a `Config` error when the base URL or credential is missing
    /// or empty, when the base URL has no `http(s)://` scheme, or when a
    /// numeric override does not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary lookup function.
    ///
    /// `from_env` passes `env::var`; tests pass a map so they stay hermetic.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = required(&lookup, ENV_API_BASE_URL)?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(StoryforgeError::Config(format!(
                "{ENV_API_BASE_URL} must start with http:// or https://, got '{base_url}'"
            )));
        }

        let api_key = required(&lookup, ENV_API_KEY)?;

        let model = match trimmed(&lookup, ENV_MODEL) {
            Some(value) => value,
            None => DEFAULT_MODEL.to_string(),
        };

        let timeout_secs = parsed(&lookup, ENV_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(StoryforgeError::Config(format!(
                "{ENV_TIMEOUT_SECS} must be greater than zero"
            )));
        }
        let max_retries = parsed(&lookup, ENV_MAX_RETRIES, DEFAULT_MAX_RETRIES)?;

        Ok(Self {
            base_url,
            api_key,
            model,
            timeout_secs,
            max_retries,
        })
    }
}

/// Fetch a variable, trimming surrounding whitespace; empty counts as unset.
fn trimmed(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    trimmed(lookup, key)
        .ok_or_else(|| StoryforgeError::Config(format!("{key} is not set (required)")))
}

fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T> {
    match trimmed(lookup, key) {
        Some(value) => value
            .parse()
            .map_err(|_| StoryforgeError::Config(format!("{key} is not a valid number: '{value}'"))),
        None => Ok(default),
    }
}
