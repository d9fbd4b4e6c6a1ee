//! Accounts domain: plan tiers, daily usage quota, usage storage

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Account, PlanTier, UsageSnapshot};
pub use domain::quota::{QuotaDecision, UsageQuota, DAILY_LIMIT_REASON, FREE_DAILY_LIMIT};

// Re-export repository types
#[cfg(any(test, feature = "test-support"))]
pub use repository::InMemoryAccountStore;
pub use repository::{AccountRepository, AccountUsageStore};

// Re-export API types
pub use api::routes;
pub use api::AccountsState;
