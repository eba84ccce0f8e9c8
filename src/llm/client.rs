use crate::config::LlmConfig;
use crate::error::{Result, StoryforgeError};
use crate::llm::extract::{truncate_preview, PREVIEW_LIMIT};
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

/// Base delay for the retry loop; attempt `n` sleeps `n * base`.
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Message author on the chat-completions wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged unit of a conversation. Built per call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One chat-completion round trip.
///
/// [`ChatClient`] is the production implementation. Every stage talks to the
/// endpoint through this trait, so tests and `--offline` runs substitute
/// their own response source instead of the network.
pub trait ChatCompleter {
    /// Send an ordered conversation and return the completion text.
    fn complete(&self, conversation: &[ChatMessage], temperature: f32) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Blocking HTTP client for `{base_url}/chat/completions`.
///
/// Holds everything it needs from the startup configuration; no environment
/// lookups happen after construction. Transport errors, HTTP statuses ≥ 400,
/// and empty completions are retried with linearly increasing backoff before
/// the call fails with `CompletionFailed`.
pub struct ChatClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_retries: u32,
}

impl ChatClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoryforgeError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint_url(&config.base_url),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_retries: config.max_retries,
        })
    }

    /// One attempt: POST, status check, body parse. Errors are plain strings
    /// so the retry loop can carry the last one into `CompletionFailed`.
    fn complete_once(
        &self,
        conversation: &[ChatMessage],
        temperature: f32,
    ) -> std::result::Result<String, String> {
        let request = build_request(&self.model, conversation, temperature);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| format!("request error: {e}"))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| format!("failed to read response body: {e}"))?;

        if status.as_u16() >= 400 {
            return Err(format!(
                "HTTP {status}: {}",
                truncate_preview(&body, PREVIEW_LIMIT)
            ));
        }

        parse_completion_text(&body)
    }
}

impl ChatCompleter for ChatClient {
    fn complete(&self, conversation: &[ChatMessage], temperature: f32) -> Result<String> {
        let attempts = self.max_retries + 1;
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match self.complete_once(conversation, temperature) {
                Ok(text) => return Ok(text),
                Err(error) => {
                    last_error = error;
                    if attempt < attempts {
                        thread::sleep(backoff_delay(attempt));
                    }
                }
            }
        }

        Err(StoryforgeError::CompletionFailed(format!(
            "exhausted {attempts} attempts: {last_error}"
        )))
    }
}

/// Client that never reaches the network; every call fails with
/// `CompletionFailed`, which drives each stage onto its offline fixture.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineClient;

impl ChatCompleter for OfflineClient {
    fn complete(&self, _conversation: &[ChatMessage], _temperature: f32) -> Result<String> {
        Err(StoryforgeError::CompletionFailed(
            "offline mode: no completion endpoint".to_string(),
        ))
    }
}

fn endpoint_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

fn build_request<'a>(
    model: &'a str,
    conversation: &'a [ChatMessage],
    temperature: f32,
) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: conversation,
        temperature: temperature.clamp(0.0, 2.0),
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(RETRY_BASE_DELAY_MS * u64::from(attempt))
}

fn parse_completion_text(body: &str) -> std::result::Result<String, String> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| format!("unrecognized response body: {e}"))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| "response contained no choices".to_string())?;

    match choice.message.content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err("response contained no completion content".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_config() -> LlmConfig {
        LlmConfig {
            base_url: "https://api.example.com/v1".to_string(),
            api_key: "sk-test".to_string(),
            model: "test-model".to_string(),
            timeout_secs: 5,
            max_retries: 2,
        }
    }

    // ========================================================================
    // Wire format
    // ========================================================================

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::System).unwrap(), json!("system"));
        assert_eq!(serde_json::to_value(Role::User).unwrap(), json!("user"));
    }

    #[test]
    fn test_message_constructors_set_roles() {
        assert_eq!(ChatMessage::system("a").role, Role::System);
        assert_eq!(ChatMessage::user("b").role, Role::User);
    }

    #[test]
    fn test_request_body_shape() {
        let conversation = [
            ChatMessage::system("be brief"),
            ChatMessage::user("say hi"),
        ];
        let request = build_request("test-model", &conversation, 0.5);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "test-model",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "say hi"}
                ],
                "temperature": 0.5
            })
        );
    }

    #[test]
    fn test_temperature_is_clamped() {
        let conversation = [ChatMessage::user("x")];
        assert_eq!(build_request("m", &conversation, 9.0).temperature, 2.0);
        assert_eq!(build_request("m", &conversation, -1.0).temperature, 0.0);
        assert_eq!(build_request("m", &conversation, 0.5).temperature, 0.5);
    }

    // ========================================================================
    // Endpoint and backoff helpers
    // ========================================================================

    #[test]
    fn test_endpoint_url_appends_path() {
        assert_eq!(
            endpoint_url("https://api.example.com/v1"),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        assert_eq!(
            endpoint_url("https://api.example.com/v1/"),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_backoff_grows_linearly() {
        assert_eq!(backoff_delay(1), Duration::from_millis(RETRY_BASE_DELAY_MS));
        assert_eq!(
            backoff_delay(3),
            Duration::from_millis(RETRY_BASE_DELAY_MS * 3)
        );
    }

    // ========================================================================
    // Response parsing
    // ========================================================================

    #[test]
    fn test_parse_completion_extracts_first_choice() {
        let body = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "hello"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        })
        .to_string();
        assert_eq!(parse_completion_text(&body).unwrap(), "hello");
    }

    #[test]
    fn test_parse_completion_no_choices_fails() {
        let err = parse_completion_text(r#"{"choices": []}"#).unwrap_err();
        assert!(err.contains("no choices"));
    }

    #[test]
    fn test_parse_completion_missing_choices_field_fails() {
        let err = parse_completion_text(r#"{"id": "x"}"#).unwrap_err();
        assert!(err.contains("no choices"));
    }

    #[test]
    fn test_parse_completion_null_content_fails() {
        let body = r#"{"choices": [{"message": {"content": null}}]}"#;
        let err = parse_completion_text(body).unwrap_err();
        assert!(err.contains("no completion content"));
    }

    #[test]
    fn test_parse_completion_blank_content_fails() {
        let body = r#"{"choices": [{"message": {"content": "   "}}]}"#;
        assert!(parse_completion_text(body).is_err());
    }

    #[test]
    fn test_parse_completion_invalid_body_fails() {
        let err = parse_completion_text("<html>gateway error</html>").unwrap_err();
        assert!(err.contains("unrecognized response body"));
    }

    // ========================================================================
    // Clients
    // ========================================================================

    #[test]
    fn test_client_builds_endpoint_from_config() {
        let client = ChatClient::new(&make_config()).unwrap();
        assert_eq!(
            client.endpoint,
            "https://api.example.com/v1/chat/completions"
        );
        assert_eq!(client.model, "test-model");
        assert_eq!(client.max_retries, 2);
    }

    #[test]
    fn test_offline_client_always_fails_completion() {
        let err = OfflineClient
            .complete(&[ChatMessage::user("anything")], 0.2)
            .unwrap_err();
        assert!(matches!(err, StoryforgeError::CompletionFailed(_)));
        assert!(err.to_string().contains("offline"));
    }
}
