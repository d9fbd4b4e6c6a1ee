//! Generation API handler
//!
//! - POST /v1/generations - Generate plan, flashcards and quiz for a topic

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use studyforge_auth::AuthUser;
use studyforge_common::{Result, ValidatedJson};
use validator::Validate;

use super::bundles::BundleResponse;
use crate::api::middleware::LearningState;

/// Request for a new generation
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    #[validate(length(min = 1, max = 200, message = "Topic must be 1 to 200 characters"))]
    pub topic: String,
}

/// Run a quota-gated generation for the caller
pub async fn create_generation(
    AuthUser(ctx): AuthUser,
    State(state): State<LearningState>,
    ValidatedJson(req): ValidatedJson<GenerateRequest>,
) -> Result<(StatusCode, Json<BundleResponse>)> {
    let bundle = state
        .orchestrator
        .generate(ctx.account_id, &req.topic)
        .await?;

    Ok((StatusCode::CREATED, Json(bundle.into())))
}
