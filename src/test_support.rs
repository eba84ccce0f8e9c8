//! Scripted stand-ins for the chat endpoint, shared by unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::{Result, StoryforgeError};
use crate::llm::{ChatCompleter, ChatMessage};

/// Returns a fixed sequence of responses, one per call, in order.
/// Running past the end of the script is a test bug and panics.
pub struct ScriptedClient {
    responses: RefCell<VecDeque<String>>,
}

impl ScriptedClient {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: RefCell::new(responses.into_iter().map(Into::into).collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.responses.borrow().len()
    }
}

impl ChatCompleter for ScriptedClient {
    fn complete(&self, _conversation: &[ChatMessage], _temperature: f32) -> Result<String> {
        match self.responses.borrow_mut().pop_front() {
            Some(response) => Ok(response),
            None => panic!("scripted client ran out of responses"),
        }
    }
}

/// Fails every call with the given reason, like an unreachable endpoint.
pub struct FailingClient {
    reason: String,
}

impl FailingClient {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

impl ChatCompleter for FailingClient {
    fn complete(&self, _conversation: &[ChatMessage], _temperature: f32) -> Result<String> {
        Err(StoryforgeError::CompletionFailed(self.reason.clone()))
    }
}

/// Answers every call with the same response and records what it was asked.
pub struct CapturingClient {
    response: String,
    conversations: RefCell<Vec<Vec<ChatMessage>>>,
    temperatures: RefCell<Vec<f32>>,
}

impl CapturingClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            conversations: RefCell::new(Vec::new()),
            temperatures: RefCell::new(Vec::new()),
        }
    }

    pub fn conversations(&self) -> Vec<Vec<ChatMessage>> {
        self.conversations.borrow().clone()
    }

    pub fn temperatures(&self) -> Vec<f32> {
        self.temperatures.borrow().clone()
    }
}

impl ChatCompleter for CapturingClient {
    fn complete(&self, conversation: &[ChatMessage], temperature: f32) -> Result<String> {
        self.conversations.borrow_mut().push(conversation.to_vec());
        self.temperatures.borrow_mut().push(temperature);
        Ok(self.response.clone())
    }
}
