//! Daily usage quota
//!
//! Free accounts get one generation per calendar day, premium accounts are
//! unlimited. The day boundary is local midnight, not a rolling 24 hours:
//! a counter whose `last_generation_at` falls before today's midnight is
//! stale and counts as zero.
//!
//! Everything here is pure. Callers pass the same `now` to `evaluate` and
//! `apply_usage` so both see the same day.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;

use crate::domain::entities::Account;

/// Generations a free account may run per calendar day
pub const FREE_DAILY_LIMIT: i32 = 1;

/// Reason given to free accounts that used up today's allowance
pub const DAILY_LIMIT_REASON: &str =
    "Daily limit reached. Upgrade to premium for unlimited learning plans.";

/// Outcome of a quota check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotaDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl QuotaDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

/// Whether `last` falls on the same calendar day as `now` in `tz`.
///
/// A `last` later than `now` (clock skew between writers) counts as today.
pub fn is_same_day<Tz: TimeZone>(
    last: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> bool {
    match last {
        None => false,
        Some(last) => {
            last.with_timezone(tz).date_naive() >= now.with_timezone(tz).date_naive()
        }
    }
}

/// Quota rules for generation requests
pub struct UsageQuota;

impl UsageQuota {
    /// Decide whether `account` may generate now (server-local day)
    pub fn evaluate(account: &Account, now: DateTime<Utc>) -> QuotaDecision {
        Self::evaluate_in(account, now, &Local)
    }

    pub fn evaluate_in<Tz: TimeZone>(
        account: &Account,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> QuotaDecision {
        if account.is_premium() {
            return QuotaDecision::allow();
        }

        if Self::effective_usage_in(account, now, tz) >= FREE_DAILY_LIMIT {
            return QuotaDecision::deny(DAILY_LIMIT_REASON);
        }

        QuotaDecision::allow()
    }

    /// The account as it should be stored after one successful generation
    pub fn apply_usage(account: &Account, now: DateTime<Utc>) -> Account {
        Self::apply_usage_in(account, now, &Local)
    }

    pub fn apply_usage_in<Tz: TimeZone>(account: &Account, now: DateTime<Utc>, tz: &Tz) -> Account {
        let used = if is_same_day(account.last_generation_at, now, tz) {
            account.daily_generations_used + 1
        } else {
            1
        };

        Account {
            daily_generations_used: used,
            last_generation_at: Some(now),
            updated_at: now,
            ..account.clone()
        }
    }

    /// Generations counted against today, zero when the counter is stale
    pub fn effective_usage_in<Tz: TimeZone>(account: &Account, now: DateTime<Utc>, tz: &Tz) -> i32 {
        if is_same_day(account.last_generation_at, now, tz) {
            account.daily_generations_used.max(0)
        } else {
            0
        }
    }

    /// Generations left today; `None` means unlimited
    pub fn remaining_today(account: &Account, now: DateTime<Utc>) -> Option<i32> {
        if account.is_premium() {
            return None;
        }
        let used = Self::effective_usage_in(account, now, &Local);
        Some((FREE_DAILY_LIMIT - used).max(0))
    }
}
