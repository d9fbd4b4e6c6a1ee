//! Mock LLM Service Implementation
//!
//! Programmable mock for tests and local development:
//! - `MockLlmService`: records every request, answers from configured rules
//! - `MockLlmBehavior`: reply rules keyed by a prompt substring, plus delay
//! - `MockReply`: fixed content, a provider failure, or an empty answer
//!
//! Requests that match no rule get an echo of the last user message.

use crate::{CompletionRequest, CompletionResponse, LlmError, LlmService};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

/// What the mock answers for a matching request
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Return this text as the completion content
    Content(String),
    /// Fail the call as a transport/provider error
    Fail(String),
    /// Provider succeeded but produced nothing
    Empty,
}

#[derive(Debug, Clone)]
struct MockRule {
    needle: String,
    reply: MockReply,
}

/// Programmable behavior for the mock LLM service
#[derive(Debug, Default)]
pub struct MockLlmBehavior {
    rules: RwLock<Vec<MockRule>>,
    delay_ms: RwLock<u64>,
}

impl MockLlmBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests whose system prompt or messages contain `needle`.
    /// Later rules take precedence over earlier ones.
    pub fn reply_when(&self, needle: impl Into<String>, reply: MockReply) {
        self.rules.write().unwrap().push(MockRule {
            needle: needle.into(),
            reply,
        });
    }

    /// Delay every completion, so concurrent callers interleave
    pub fn set_delay_ms(&self, delay: u64) {
        *self.delay_ms.write().unwrap() = delay;
    }

    /// Reset to default behavior
    pub fn reset(&self) {
        self.rules.write().unwrap().clear();
        *self.delay_ms.write().unwrap() = 0;
    }

    fn reply_for(&self, request: &CompletionRequest) -> Option<MockReply> {
        let rules = self.rules.read().unwrap();
        rules
            .iter()
            .rev()
            .find(|rule| {
                request
                    .system_prompt
                    .as_deref()
                    .is_some_and(|s| s.contains(&rule.needle))
                    || request
                        .messages
                        .iter()
                        .any(|m| m.content.contains(&rule.needle))
            })
            .map(|rule| rule.reply.clone())
    }

    fn delay_ms(&self) -> u64 {
        *self.delay_ms.read().unwrap()
    }
}

/// Mock LLM service for testing
#[derive(Debug, Clone, Default)]
pub struct MockLlmService {
    behavior: Arc<MockLlmBehavior>,
    history: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behavior(behavior: Arc<MockLlmBehavior>) -> Self {
        Self {
            behavior,
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared behavior for configuration from tests
    pub fn behavior(&self) -> &Arc<MockLlmBehavior> {
        &self.behavior
    }

    /// Every request received so far, in arrival order
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.history.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.history.lock().unwrap().len()
    }

    pub fn reset_history(&self) {
        self.history.lock().unwrap().clear();
    }
}

#[async_trait::async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        tracing::info!("Mock LLM service processing completion request");

        self.history.lock().unwrap().push(request.clone());

        let delay = self.behavior.delay_ms();
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let model = if request.model.is_empty() {
            "mock-model".to_string()
        } else {
            request.model.clone()
        };

        let content = match self.behavior.reply_for(&request) {
            Some(MockReply::Content(content)) => content,
            Some(MockReply::Fail(message)) => return Err(LlmError::Request(message)),
            Some(MockReply::Empty) => return Err(LlmError::EmptyResponse),
            None => {
                let last_message = request
                    .messages
                    .last()
                    .map(|m| m.content.as_str())
                    .unwrap_or("empty");
                format!("Mock response to: {}", last_message)
            }
        };

        let input_tokens = request
            .messages
            .iter()
            .map(|m| m.content.len() as i32 / 4)
            .sum::<i32>();
        let output_tokens = content.len() as i32 / 4;

        Ok(CompletionResponse {
            content,
            model,
            input_tokens,
            output_tokens,
            stop_reason: "stop".to_string(),
        })
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }
}
