//! Accounts domain state and auth backend integration

use crate::repository::AccountUsageStore;
use axum::extract::FromRef;
use std::sync::Arc;
use studyforge_auth::AuthBackend;

/// Application state for the Accounts domain
#[derive(Clone)]
pub struct AccountsState {
    pub accounts: Arc<dyn AccountUsageStore>,
    pub auth: AuthBackend,
}

impl FromRef<AccountsState> for AuthBackend {
    fn from_ref(state: &AccountsState) -> Self {
        state.auth.clone()
    }
}
