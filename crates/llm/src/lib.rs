//! Studyforge LLM Service
//!
//! Text-completion seam used by the learning content generator:
//! - OpenAI chat completions for production (JSON-object mode supported)
//! - Programmable mock service for tests and local development
//! - Provider, model and credentials come from `LlmConfig`, injected at
//!   construction time

pub mod mock;
pub mod openai;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_MAX_TOKENS: u32 = 2000;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM configuration error: {0}")]
    Configuration(String),

    #[error("LLM request error: {0}")]
    Request(String),

    #[error("LLM response error: {0}")]
    Response(String),

    #[error("LLM rate limit exceeded")]
    RateLimit,

    /// The provider answered but produced no content
    #[error("LLM returned an empty response")]
    EmptyResponse,
}

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmRole {
    User,
    Assistant,
}

/// A single conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: LlmRole,
    pub content: String,
}

impl LlmMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: LlmRole::User,
            content: content.into(),
        }
    }
}

/// Output format requested from the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Text,
    /// Provider must answer with a single JSON object
    JsonObject,
}

/// Completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model override; empty means the service default
    pub model: String,
    pub system_prompt: Option<String>,
    pub messages: Vec<LlmMessage>,
    /// Output cap; `None` falls back to `LlmConfig::max_tokens`
    pub max_tokens: Option<u32>,
    pub response_format: ResponseFormat,
}

/// Completion response
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    pub input_tokens: i32,
    pub output_tokens: i32,
    pub stop_reason: String,
}

/// LLM service configuration
#[derive(Clone)]
pub struct LlmConfig {
    /// Provider (openai, mock)
    pub provider: String,
    pub api_key: String,
    pub default_model: String,
    /// `LLM_MAX_TOKENS`, used only by requests that set no `max_tokens`
    pub max_tokens: u32,
    /// Override for the provider base URL (proxies, tests)
    pub base_url: Option<String>,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &"[REDACTED]")
            .field("default_model", &self.default_model)
            .field("max_tokens", &self.max_tokens)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl LlmConfig {
    /// Create LLM config from environment variables
    pub fn from_env() -> Result<Self, LlmError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "mock".to_string());
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();

        if provider == "openai" && api_key.is_empty() {
            return Err(LlmError::Configuration(
                "OPENAI_API_KEY is required for the openai provider".to_string(),
            ));
        }

        let default_model =
            std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let max_tokens = std::env::var("LLM_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let base_url = std::env::var("OPENAI_BASE_URL").ok();

        Ok(Self {
            provider,
            api_key,
            default_model,
            max_tokens,
            base_url,
        })
    }

    /// Whether completions come from the built-in mock
    pub fn is_mock(&self) -> bool {
        self.provider == "mock"
    }
}

/// LLM service trait for different providers
#[async_trait::async_trait]
pub trait LlmService: Send + Sync {
    /// Run a single completion
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Model used when the request leaves `model` empty
    fn default_model(&self) -> &str;
}

/// Factory for creating LlmService implementations
pub struct LlmServiceFactory;

impl LlmServiceFactory {
    pub fn create(config: LlmConfig) -> Result<Box<dyn LlmService>, LlmError> {
        match config.provider.as_str() {
            "openai" => {
                tracing::info!(model = %config.default_model, "Creating OpenAI LLM service");
                if config.api_key.is_empty() {
                    return Err(LlmError::Configuration(
                        "OPENAI_API_KEY is required for the openai provider".to_string(),
                    ));
                }
                Ok(Box::new(openai::OpenAiService::new(config)))
            }
            "mock" => {
                tracing::info!("Creating mock LLM service");
                Ok(Box::new(mock::MockLlmService::new()))
            }
            provider => Err(LlmError::Configuration(format!(
                "Unknown LLM provider: {}. Supported providers: openai, mock",
                provider
            ))),
        }
    }
}
