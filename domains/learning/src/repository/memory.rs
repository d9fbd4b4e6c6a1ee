//! In-memory bundle store for tests

use std::sync::atomic::{AtomicBool, Ordering};

use studyforge_common::RepositoryError;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::entities::{ArtifactBundle, BundleSummary};
use crate::repository::ArtifactStore;

#[derive(Debug, Default)]
pub struct InMemoryArtifactStore {
    bundles: Mutex<Vec<ArtifactBundle>>,
    unavailable: AtomicBool,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.bundles.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.bundles.lock().await.is_empty()
    }

    /// Every operation fails with a connection error while set
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Connection(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn create(&self, bundle: &ArtifactBundle) -> Result<ArtifactBundle, RepositoryError> {
        self.check_available()?;

        let mut bundles = self.bundles.lock().await;
        if bundles.iter().any(|b| b.id == bundle.id) {
            return Err(RepositoryError::AlreadyExists);
        }
        bundles.push(bundle.clone());
        Ok(bundle.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<ArtifactBundle>, RepositoryError> {
        self.check_available()?;
        Ok(self
            .bundles
            .lock()
            .await
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BundleSummary>, RepositoryError> {
        self.check_available()?;

        let bundles = self.bundles.lock().await;
        let mut owned: Vec<&ArtifactBundle> =
            bundles.iter().filter(|b| b.owner_id == owner_id).collect();
        // Stable sort keeps later inserts first among equal timestamps
        owned.reverse();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(owned
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(BundleSummary::from)
            .collect())
    }
}
