//! Domain entities for the Learning domain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use studyforge_common::{Error, Result};

use crate::domain::artifacts::{FlashcardArtifact, PlanArtifact, QuizArtifact};

/// Maximum topic length in characters
pub const MAX_TOPIC_CHARS: usize = 200;

/// Check a topic against the 1..=200 character rule
pub fn validate_topic(topic: &str) -> Result<()> {
    let chars = topic.chars().count();
    if chars == 0 {
        return Err(Error::Validation("Topic is required".to_string()));
    }
    if chars > MAX_TOPIC_CHARS {
        return Err(Error::Validation(format!(
            "Topic must be at most {} characters",
            MAX_TOPIC_CHARS
        )));
    }
    Ok(())
}

/// A complete generation result: one of each artifact for one topic.
///
/// Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ArtifactBundle {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub topic: String,
    pub plan: Json<PlanArtifact>,
    pub flashcards: Json<FlashcardArtifact>,
    pub quiz: Json<QuizArtifact>,
    pub created_at: DateTime<Utc>,
}

impl ArtifactBundle {
    pub fn new(
        owner_id: Uuid,
        topic: String,
        plan: PlanArtifact,
        flashcards: FlashcardArtifact,
        quiz: QuizArtifact,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        validate_topic(&topic)?;

        Ok(ArtifactBundle {
            id: Uuid::new_v4(),
            owner_id,
            topic,
            plan: Json(plan),
            flashcards: Json(flashcards),
            quiz: Json(quiz),
            created_at,
        })
    }
}

/// List entry for an account's bundles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BundleSummary {
    pub id: Uuid,
    pub topic: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ArtifactBundle> for BundleSummary {
    fn from(bundle: &ArtifactBundle) -> Self {
        Self {
            id: bundle.id,
            topic: bundle.topic.clone(),
            created_at: bundle.created_at,
        }
    }
}
