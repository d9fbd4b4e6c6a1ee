//! Postgres account repository

use crate::domain::entities::{Account, PlanTier, UsageSnapshot};
use crate::repository::{checked, AccountUsageStore};
use sqlx::PgPool;
use studyforge_common::RepositoryError;
use uuid::Uuid;

/// All columns in the accounts table, used for SELECT and RETURNING clauses.
pub(crate) const ACCOUNT_COLUMNS: &str = "id, email, username, tier, daily_generations_used, last_generation_at, upgraded_at, created_at, updated_at";

#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}

#[async_trait::async_trait]
impl AccountUsageStore for AccountRepository {
    async fn load(&self, id: Uuid) -> Result<Option<Account>, RepositoryError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");
        let row = sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(checked).transpose()
    }

    async fn commit_usage(
        &self,
        id: Uuid,
        expected: UsageSnapshot,
        updated: UsageSnapshot,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                daily_generations_used = $2,
                last_generation_at = $3,
                updated_at = NOW()
            WHERE id = $1
              AND daily_generations_used = $4
              AND last_generation_at IS NOT DISTINCT FROM $5
            "#,
        )
        .bind(id)
        .bind(updated.daily_generations_used)
        .bind(updated.last_generation_at)
        .bind(expected.daily_generations_used)
        .bind(expected.last_generation_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        // Nothing matched: either the row is gone or its usage moved on
        if self.exists(id).await? {
            Err(RepositoryError::Conflict)
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    async fn set_tier(&self, id: Uuid, tier: PlanTier) -> Result<Account, RepositoryError> {
        let query = format!(
            r#"
            UPDATE accounts SET
                tier = $2,
                upgraded_at = CASE WHEN $3 THEN COALESCE(upgraded_at, NOW()) ELSE upgraded_at END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .bind(tier)
            .bind(tier == PlanTier::Premium)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }
}
