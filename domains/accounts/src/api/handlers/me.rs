//! Account usage API handler
//!
//! - GET /v1/me - Current account with today's remaining generations

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use studyforge_auth::AuthUser;
use studyforge_common::{Error, Result};
use uuid::Uuid;

use crate::api::middleware::AccountsState;
use crate::domain::entities::{Account, PlanTier};
use crate::domain::quota::UsageQuota;

/// Account view with quota information for the client UI
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub tier: PlanTier,
    pub daily_generations_used: i32,
    pub last_generation_at: Option<DateTime<Utc>>,
    /// `null` for premium accounts
    pub remaining_generations_today: Option<i32>,
}

impl MeResponse {
    pub fn new(account: Account, now: DateTime<Utc>) -> Self {
        let remaining_generations_today = UsageQuota::remaining_today(&account, now);
        Self {
            id: account.id,
            email: account.email,
            username: account.username,
            tier: account.tier,
            daily_generations_used: account.daily_generations_used,
            last_generation_at: account.last_generation_at,
            remaining_generations_today,
        }
    }
}

/// GET /v1/me - Get the caller's account and remaining quota
pub async fn get_me(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
) -> Result<Json<MeResponse>> {
    let account = state
        .accounts
        .load(ctx.account_id)
        .await?
        .ok_or_else(|| Error::NotFound("Account not found".to_string()))?;

    Ok(Json(MeResponse::new(account, Utc::now())))
}
