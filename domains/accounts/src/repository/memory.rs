//! In-memory account store for tests
//!
//! Same compare-and-swap contract as the Postgres repository. Tests can
//! inject commit conflicts or take the store offline to drive failure paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::Utc;
use studyforge_common::RepositoryError;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::entities::{Account, PlanTier, UsageSnapshot};
use crate::repository::{checked, AccountUsageStore};

#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: Mutex<HashMap<Uuid, Account>>,
    forced_conflicts: AtomicUsize,
    unavailable: AtomicBool,
    commit_attempts: AtomicUsize,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, account: Account) {
        self.accounts.lock().await.insert(account.id, account);
    }

    /// Current stored copy, bypassing failure injection
    pub async fn get(&self, id: Uuid) -> Option<Account> {
        self.accounts.lock().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> Option<Account> {
        self.accounts.lock().await.remove(&id)
    }

    /// Make the next `n` commits fail with `Conflict` without writing
    pub fn force_conflicts(&self, n: usize) {
        self.forced_conflicts.store(n, Ordering::SeqCst);
    }

    /// Every operation fails with a connection error while set
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `commit_usage` calls seen, including failed ones
    pub fn commit_attempts(&self) -> usize {
        self.commit_attempts.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Connection(sqlx::Error::PoolClosed));
        }
        Ok(())
    }

    fn take_forced_conflict(&self) -> bool {
        self.forced_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait::async_trait]
impl AccountUsageStore for InMemoryAccountStore {
    async fn load(&self, id: Uuid) -> Result<Option<Account>, RepositoryError> {
        self.check_available()?;
        self.accounts
            .lock()
            .await
            .get(&id)
            .cloned()
            .map(checked)
            .transpose()
    }

    async fn commit_usage(
        &self,
        id: Uuid,
        expected: UsageSnapshot,
        updated: UsageSnapshot,
    ) -> Result<(), RepositoryError> {
        self.commit_attempts.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let mut accounts = self.accounts.lock().await;
        let account = accounts.get_mut(&id).ok_or(RepositoryError::NotFound)?;

        if self.take_forced_conflict() || account.usage() != expected {
            return Err(RepositoryError::Conflict);
        }

        account.daily_generations_used = updated.daily_generations_used;
        account.last_generation_at = updated.last_generation_at;
        account.updated_at = Utc::now();
        Ok(())
    }

    async fn set_tier(&self, id: Uuid, tier: PlanTier) -> Result<Account, RepositoryError> {
        self.check_available()?;

        let mut accounts = self.accounts.lock().await;
        let account = accounts.get_mut(&id).ok_or(RepositoryError::NotFound)?;

        let now = Utc::now();
        account.tier = tier;
        if tier == PlanTier::Premium && account.upgraded_at.is_none() {
            account.upgraded_at = Some(now);
        }
        account.updated_at = now;
        Ok(account.clone())
    }
}
