//! Repository implementations for Accounts domain

pub mod accounts;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;

use crate::domain::entities::{Account, PlanTier, UsageSnapshot};
use studyforge_common::RepositoryError;
use uuid::Uuid;

pub use accounts::AccountRepository;
#[cfg(any(test, feature = "test-support"))]
pub use memory::InMemoryAccountStore;

/// Durable storage of per-account tier and daily usage.
///
/// `commit_usage` is a compare-and-swap: the write only lands if the stored
/// usage still equals `expected`. A concurrent writer that got there first
/// yields `RepositoryError::Conflict`, an unknown account `NotFound`.
#[async_trait::async_trait]
pub trait AccountUsageStore: Send + Sync {
    async fn load(&self, id: Uuid) -> Result<Option<Account>, RepositoryError>;

    async fn commit_usage(
        &self,
        id: Uuid,
        expected: UsageSnapshot,
        updated: UsageSnapshot,
    ) -> Result<(), RepositoryError>;

    /// Switch the plan tier. Moving to premium stamps `upgraded_at` once.
    async fn set_tier(&self, id: Uuid, tier: PlanTier) -> Result<Account, RepositoryError>;
}

/// Reject stored rows that break account invariants
pub(crate) fn checked(account: Account) -> Result<Account, RepositoryError> {
    if let Err(e) = account.validate() {
        tracing::error!(account_id = %account.id, error = %e, "Stored account breaks invariants");
        return Err(RepositoryError::InvalidData(e.to_string()));
    }
    Ok(account)
}
