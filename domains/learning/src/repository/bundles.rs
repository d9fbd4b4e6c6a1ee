//! Postgres bundle repository

use crate::domain::entities::{ArtifactBundle, BundleSummary};
use crate::repository::ArtifactStore;
use sqlx::PgPool;
use studyforge_common::RepositoryError;
use uuid::Uuid;

/// All columns in the learning_bundles table, used for SELECT and RETURNING clauses.
pub(crate) const BUNDLE_COLUMNS: &str = "id, owner_id, topic, plan, flashcards, quiz, created_at";

#[derive(Clone)]
pub struct BundleRepository {
    pool: PgPool,
}

impl BundleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ArtifactStore for BundleRepository {
    async fn create(&self, bundle: &ArtifactBundle) -> Result<ArtifactBundle, RepositoryError> {
        let query = format!(
            r#"
            INSERT INTO learning_bundles ({BUNDLE_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {BUNDLE_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, ArtifactBundle>(&query)
            .bind(bundle.id)
            .bind(bundle.owner_id)
            .bind(&bundle.topic)
            .bind(&bundle.plan)
            .bind(&bundle.flashcards)
            .bind(&bundle.quiz)
            .bind(bundle.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    RepositoryError::AlreadyExists
                }
                other => RepositoryError::Connection(other),
            })?;
        Ok(row)
    }

    async fn find(&self, id: Uuid) -> Result<Option<ArtifactBundle>, RepositoryError> {
        let query = format!("SELECT {BUNDLE_COLUMNS} FROM learning_bundles WHERE id = $1");
        let row = sqlx::query_as::<_, ArtifactBundle>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BundleSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, BundleSummary>(
            r#"
            SELECT id, topic, created_at
            FROM learning_bundles
            WHERE owner_id = $1
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
