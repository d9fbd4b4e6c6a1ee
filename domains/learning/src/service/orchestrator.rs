//! Generation orchestrator
//!
//! One generation is all-or-nothing:
//! 1. load the account and check the daily quota
//! 2. ask the provider for plan, flashcards and quiz concurrently
//! 3. persist the bundle only if all three succeeded
//! 4. charge the quota with a compare-and-swap commit
//!
//! A failed generation persists nothing and charges nothing. A commit that
//! fails after the bundle was stored leaves the bundle in place uncharged.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use studyforge_accounts::{Account, AccountUsageStore, UsageQuota, DAILY_LIMIT_REASON};
use studyforge_common::{Error, RepositoryError};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::artifacts::{FlashcardArtifact, PlanArtifact, QuizArtifact};
use crate::domain::entities::{validate_topic, ArtifactBundle};
use crate::repository::ArtifactStore;
use crate::service::provider::{ContentProviderClient, ProviderError};

/// Usage commits attempted before a conflict is reported
const MAX_COMMIT_ATTEMPTS: u32 = 3;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    #[error("Account not found")]
    AccountNotFound,

    #[error("{0}")]
    QuotaExceeded(String),

    #[error("Generation failed: {}", describe(.0))]
    GenerationFailed(Vec<ProviderError>),

    #[error("Persistence error: {0}")]
    Persistence(#[from] RepositoryError),
}

fn describe(errors: &[ProviderError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<GenerationError> for Error {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::InvalidTopic(msg) => Error::Validation(msg),
            GenerationError::AccountNotFound => Error::NotFound("Account not found".to_string()),
            GenerationError::QuotaExceeded(reason) => Error::QuotaExceeded(reason),
            e @ GenerationError::GenerationFailed(_) => Error::GenerationFailed(e.to_string()),
            GenerationError::Persistence(e) => Error::Persistence(e.to_string()),
        }
    }
}

/// The three artifacts of one generation.
///
/// Only `assemble` builds it, and only when every branch succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedContent {
    plan: PlanArtifact,
    flashcards: FlashcardArtifact,
    quiz: QuizArtifact,
}

impl GeneratedContent {
    /// Combine the three provider results, or return every failure
    pub fn assemble(
        plan: Result<PlanArtifact, ProviderError>,
        flashcards: Result<FlashcardArtifact, ProviderError>,
        quiz: Result<QuizArtifact, ProviderError>,
    ) -> Result<Self, Vec<ProviderError>> {
        match (plan, flashcards, quiz) {
            (Ok(plan), Ok(flashcards), Ok(quiz)) => Ok(Self {
                plan,
                flashcards,
                quiz,
            }),
            (plan, flashcards, quiz) => Err([plan.err(), flashcards.err(), quiz.err()]
                .into_iter()
                .flatten()
                .collect()),
        }
    }

    pub fn plan(&self) -> &PlanArtifact {
        &self.plan
    }

    pub fn flashcards(&self) -> &FlashcardArtifact {
        &self.flashcards
    }

    pub fn quiz(&self) -> &QuizArtifact {
        &self.quiz
    }

    fn into_bundle(
        self,
        owner_id: Uuid,
        topic: &str,
        now: DateTime<Utc>,
    ) -> Result<ArtifactBundle, GenerationError> {
        ArtifactBundle::new(
            owner_id,
            topic.to_string(),
            self.plan,
            self.flashcards,
            self.quiz,
            now,
        )
        .map_err(|e| GenerationError::InvalidTopic(e.to_string()))
    }
}

/// Runs quota-gated, all-or-nothing generations
#[derive(Clone)]
pub struct GenerationOrchestrator {
    accounts: Arc<dyn AccountUsageStore>,
    artifacts: Arc<dyn ArtifactStore>,
    provider: ContentProviderClient,
}

impl GenerationOrchestrator {
    pub fn new(
        accounts: Arc<dyn AccountUsageStore>,
        artifacts: Arc<dyn ArtifactStore>,
        provider: ContentProviderClient,
    ) -> Self {
        Self {
            accounts,
            artifacts,
            provider,
        }
    }

    pub async fn generate(
        &self,
        account_id: Uuid,
        topic: &str,
    ) -> Result<ArtifactBundle, GenerationError> {
        validate_topic(topic).map_err(|e| GenerationError::InvalidTopic(e.to_string()))?;

        // Quota check and usage update must agree on the day
        let now = Utc::now();

        let account = self
            .accounts
            .load(account_id)
            .await?
            .ok_or(GenerationError::AccountNotFound)?;

        let decision = UsageQuota::evaluate(&account, now);
        if !decision.allowed {
            tracing::info!(
                account_id = %account_id,
                tier = %account.tier,
                daily_generations_used = account.daily_generations_used,
                "Generation rejected by daily quota"
            );
            return Err(GenerationError::QuotaExceeded(
                decision
                    .reason
                    .unwrap_or_else(|| DAILY_LIMIT_REASON.to_string()),
            ));
        }

        let (plan, flashcards, quiz) = tokio::join!(
            self.provider.generate_plan(topic),
            self.provider.generate_flashcards(topic),
            self.provider.generate_quiz(topic),
        );

        let content = GeneratedContent::assemble(plan, flashcards, quiz).map_err(|errors| {
            for error in &errors {
                tracing::error!(
                    account_id = %account_id,
                    artifact = %error.kind(),
                    error_kind = error.code(),
                    error = %error,
                    "Artifact generation failed"
                );
            }
            GenerationError::GenerationFailed(errors)
        })?;

        let bundle = content.into_bundle(account_id, topic, now)?;
        let bundle = self.artifacts.create(&bundle).await?;

        if let Err(e) = self.commit_usage(account, now).await {
            tracing::error!(
                account_id = %account_id,
                bundle_id = %bundle.id,
                error = %e,
                "Bundle stored but usage commit failed"
            );
            return Err(e);
        }

        tracing::info!(
            account_id = %account_id,
            bundle_id = %bundle.id,
            "Generation completed"
        );

        Ok(bundle)
    }

    /// Charge one generation, re-reading the account on concurrent writes
    async fn commit_usage(
        &self,
        account: Account,
        now: DateTime<Utc>,
    ) -> Result<Account, GenerationError> {
        let mut current = account;
        let mut attempt = 1;

        loop {
            let updated = UsageQuota::apply_usage(&current, now);
            let result = self
                .accounts
                .commit_usage(current.id, current.usage(), updated.usage())
                .await;

            match result {
                Ok(()) => return Ok(updated),
                Err(RepositoryError::Conflict) if attempt < MAX_COMMIT_ATTEMPTS => {
                    attempt += 1;
                    tracing::debug!(
                        account_id = %current.id,
                        attempt,
                        "Usage changed concurrently, retrying commit"
                    );

                    // The bundle is already stored; a vanished account is a store failure
                    current = self
                        .accounts
                        .load(current.id)
                        .await?
                        .ok_or(GenerationError::Persistence(RepositoryError::NotFound))?;

                    if !UsageQuota::evaluate(&current, now).allowed {
                        // The content is already delivered; charge it anyway
                        tracing::warn!(
                            account_id = %current.id,
                            daily_generations_used = current.daily_generations_used,
                            "Concurrent generation exceeded the daily allowance"
                        );
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
