//! Repository implementations for Learning domain

pub mod bundles;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;

use crate::domain::entities::{ArtifactBundle, BundleSummary};
use studyforge_common::RepositoryError;
use uuid::Uuid;

pub use bundles::BundleRepository;
#[cfg(any(test, feature = "test-support"))]
pub use memory::InMemoryArtifactStore;

/// Durable storage of generated bundles. Bundles are written once and
/// never updated.
#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn create(&self, bundle: &ArtifactBundle) -> Result<ArtifactBundle, RepositoryError>;

    async fn find(&self, id: Uuid) -> Result<Option<ArtifactBundle>, RepositoryError>;

    /// Summaries of an owner's bundles, newest first
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BundleSummary>, RepositoryError>;
}
