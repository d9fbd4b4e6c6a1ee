//! Route definitions for Accounts domain API

use axum::{routing::get, Router};

use super::handlers::me;
use super::middleware::AccountsState;

/// Create all Accounts domain API routes
pub fn routes() -> Router<AccountsState> {
    Router::new().route("/v1/me", get(me::get_me))
}
