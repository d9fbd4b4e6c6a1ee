//! Bundle read API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use studyforge_auth::AuthUser;
use studyforge_common::{Error, Pagination, Result};
use uuid::Uuid;

use crate::api::middleware::LearningState;
use crate::domain::artifacts::{FlashcardArtifact, PlanArtifact, QuizArtifact};
use crate::domain::entities::{ArtifactBundle, BundleSummary};

/// Bundle response DTO
#[derive(Debug, Serialize)]
pub struct BundleResponse {
    pub id: Uuid,
    pub topic: String,
    pub plan: PlanArtifact,
    pub flashcards: FlashcardArtifact,
    pub quiz: QuizArtifact,
    pub created_at: DateTime<Utc>,
}

impl From<ArtifactBundle> for BundleResponse {
    fn from(b: ArtifactBundle) -> Self {
        Self {
            id: b.id,
            topic: b.topic,
            plan: b.plan.0,
            flashcards: b.flashcards.0,
            quiz: b.quiz.0,
            created_at: b.created_at,
        }
    }
}

/// Get a single bundle owned by the caller
pub async fn get_bundle(
    AuthUser(ctx): AuthUser,
    State(state): State<LearningState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BundleResponse>> {
    let bundle = state
        .artifacts
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Bundle not found".to_string()))?;

    if !ctx.owns(bundle.owner_id) {
        return Err(Error::NotFound("Bundle not found".to_string()));
    }

    Ok(Json(bundle.into()))
}

/// List the caller's bundles, newest first
pub async fn list_bundles(
    AuthUser(ctx): AuthUser,
    State(state): State<LearningState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<BundleSummary>>> {
    let summaries = state
        .artifacts
        .list_by_owner(ctx.account_id, page.limit(), page.offset())
        .await?;

    Ok(Json(summaries))
}
