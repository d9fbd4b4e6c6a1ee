//! Content provider client
//!
//! Turns a topic into one artifact per call: renders the per-kind prompt,
//! runs a JSON-mode completion through the injected `LlmService`, and
//! parses the answer strictly. One attempt per call, no retries.

use std::sync::Arc;

use studyforge_llm::{CompletionRequest, LlmError, LlmMessage, LlmService, ResponseFormat};
use thiserror::Error;

use crate::domain::artifacts::{
    parse_artifact, Artifact, ArtifactKind, FlashcardArtifact, PlanArtifact, QuizArtifact,
};

const DEFAULT_LANGUAGE: &str = "German";

/// Provider-side failure for a single artifact
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport or provider failure
    #[error("{kind} generation failed: {source}")]
    Provider {
        kind: ArtifactKind,
        #[source]
        source: LlmError,
    },

    /// The provider answered, but not with a usable artifact
    #[error("{kind} response was malformed: {reason}")]
    MalformedResponse { kind: ArtifactKind, reason: String },
}

impl ProviderError {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            ProviderError::Provider { kind, .. } | ProviderError::MalformedResponse { kind, .. } => {
                *kind
            }
        }
    }

    /// Stable discriminant for logs and telemetry
    pub fn code(&self) -> &'static str {
        match self {
            ProviderError::Provider { .. } => "provider_error",
            ProviderError::MalformedResponse { .. } => "provider_malformed_response",
        }
    }

    fn from_llm(kind: ArtifactKind, err: LlmError) -> Self {
        match err {
            LlmError::EmptyResponse => ProviderError::MalformedResponse {
                kind,
                reason: "empty response".to_string(),
            },
            source => ProviderError::Provider { kind, source },
        }
    }
}

/// Content generation settings
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Language the artifacts are written in
    pub language: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl ContentConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let language = std::env::var("CONTENT_LANGUAGE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        Self { language }
    }
}

/// Per-kind prompt and token budget
struct Template {
    system: &'static str,
    instructions: &'static str,
    format: &'static str,
    max_tokens: u32,
}

fn template(kind: ArtifactKind) -> Template {
    match kind {
        ArtifactKind::Plan => Template {
            system: "You are a learning expert who designs structured 7-day learning plans. \
                     Respond only with valid JSON.",
            instructions: "Create a detailed 7-day learning plan for the topic \"{topic}\". \
                           The plan should be structured and practical to follow.",
            format: r#"{
  "days": [
    {
      "day": 1,
      "title": "Title for day 1",
      "description": "Short description of the day's goals",
      "tasks": ["Task 1", "Task 2", "Task 3"]
    }
  ]
}"#,
            max_tokens: 2000,
        },
        ArtifactKind::Flashcards => Template {
            system: "You are an expert in flashcards. You write concise, effective study cards. \
                     Respond only with valid JSON.",
            instructions: "Create 10 study cards for the topic \"{topic}\". \
                           Each card has a precise question and a complete answer.",
            format: r#"{
  "cards": [
    {
      "id": 1,
      "question": "Question here",
      "answer": "Detailed answer here"
    }
  ]
}"#,
            max_tokens: 1500,
        },
        ArtifactKind::Quiz => Template {
            system: "You are an expert in exam questions. You write a challenging multiple-choice \
                     quiz with explanations. Respond only with valid JSON.",
            instructions: "Create 8 multiple-choice questions for the topic \"{topic}\". \
                           Each question has 4 answer options, one correct answer and an explanation.",
            format: r#"{
  "questions": [
    {
      "id": 1,
      "question": "Question text here",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": 0,
      "explanation": "Why the correct answer is correct"
    }
  ]
}"#,
            max_tokens: 2000,
        },
    }
}

/// Build the completion request for one artifact kind
pub fn build_request(kind: ArtifactKind, topic: &str, language: &str) -> CompletionRequest {
    let template = template(kind);
    let prompt = format!(
        "{}\nWrite all text in {}. Respond only with JSON in this format:\n{}",
        template.instructions.replace("{topic}", topic),
        language,
        template.format
    );

    CompletionRequest {
        model: String::new(),
        system_prompt: Some(template.system.to_string()),
        messages: vec![LlmMessage::user(prompt)],
        max_tokens: Some(template.max_tokens),
        response_format: ResponseFormat::JsonObject,
    }
}

/// Client for the external content-generation provider
#[derive(Clone)]
pub struct ContentProviderClient {
    llm: Arc<dyn LlmService>,
    config: ContentConfig,
}

impl ContentProviderClient {
    pub fn new(llm: Arc<dyn LlmService>, config: ContentConfig) -> Self {
        Self { llm, config }
    }

    pub async fn generate_plan(&self, topic: &str) -> Result<PlanArtifact, ProviderError> {
        self.generate(topic).await
    }

    pub async fn generate_flashcards(&self, topic: &str) -> Result<FlashcardArtifact, ProviderError> {
        self.generate(topic).await
    }

    pub async fn generate_quiz(&self, topic: &str) -> Result<QuizArtifact, ProviderError> {
        self.generate(topic).await
    }

    async fn generate<A: Artifact>(&self, topic: &str) -> Result<A, ProviderError> {
        let kind = A::KIND;
        let request = build_request(kind, topic, &self.config.language);

        let response = self
            .llm
            .complete(request)
            .await
            .map_err(|e| ProviderError::from_llm(kind, e))?;

        let artifact: A = parse_artifact(&response.content)
            .map_err(|reason| ProviderError::MalformedResponse { kind, reason })?;

        if artifact.item_count() != A::TARGET_COUNT {
            tracing::warn!(
                artifact = %kind,
                expected = A::TARGET_COUNT,
                actual = artifact.item_count(),
                "Provider missed the requested item count"
            );
        }

        tracing::debug!(
            artifact = %kind,
            model = %response.model,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Artifact generated"
        );

        Ok(artifact)
    }
}
