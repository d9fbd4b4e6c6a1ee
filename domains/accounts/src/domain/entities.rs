//! Domain entities for the Accounts domain
//!
//! The account record is owned by the identity service; this domain reads
//! it and writes only the plan tier and the daily usage fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use studyforge_common::{Error, Result};

/// Plan tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "plan_tier", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Premium,
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanTier::Free => write!(f, "free"),
            PlanTier::Premium => write!(f, "premium"),
        }
    }
}

/// The usage fields of an account, compared as a unit on commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsageSnapshot {
    pub daily_generations_used: i32,
    pub last_generation_at: Option<DateTime<Utc>>,
}

/// Account entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub tier: PlanTier,
    /// Generations counted on the day of `last_generation_at`; stale otherwise
    pub daily_generations_used: i32,
    pub last_generation_at: Option<DateTime<Utc>>,
    pub upgraded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new free account with no usage. Production accounts come
    /// from the identity service; this builds fixtures.
    #[cfg(any(test, feature = "test-support"))]
    pub fn new(id: Uuid, email: String, username: String) -> Result<Self> {
        if email.is_empty() || !email.contains('@') {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        if username.chars().count() < 3 {
            return Err(Error::Validation(
                "Username must be at least 3 characters".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Account {
            id,
            email,
            username,
            tier: PlanTier::Free,
            daily_generations_used: 0,
            last_generation_at: None,
            upgraded_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Upgrade to the premium tier, lifting the daily limit
    #[cfg(any(test, feature = "test-support"))]
    pub fn upgrade_to_premium(&mut self) -> Result<()> {
        if self.tier == PlanTier::Premium {
            return Err(Error::Validation("Account is already premium".to_string()));
        }

        let now = Utc::now();
        self.tier = PlanTier::Premium;
        self.upgraded_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Validate invariants. Stores run this on every record they load.
    pub fn validate(&self) -> Result<()> {
        if self.daily_generations_used < 0 {
            return Err(Error::Validation(
                "Daily generation count cannot be negative".to_string(),
            ));
        }

        if self.tier == PlanTier::Premium && self.upgraded_at.is_none() {
            return Err(Error::Validation(
                "Premium accounts must have an upgrade timestamp".to_string(),
            ));
        }

        Ok(())
    }

    pub fn is_premium(&self) -> bool {
        self.tier == PlanTier::Premium
    }

    pub fn usage(&self) -> UsageSnapshot {
        UsageSnapshot {
            daily_generations_used: self.daily_generations_used,
            last_generation_at: self.last_generation_at,
        }
    }
}
