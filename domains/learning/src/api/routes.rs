//! Route definitions for Learning domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{bundles, generations};
use super::middleware::LearningState;

/// Create generation routes
fn generation_routes() -> Router<LearningState> {
    Router::new().route("/v1/generations", post(generations::create_generation))
}

/// Create bundle read routes
fn bundle_routes() -> Router<LearningState> {
    Router::new()
        .route("/v1/bundles", get(bundles::list_bundles))
        .route("/v1/bundles/{id}", get(bundles::get_bundle))
}

/// Create all Learning domain API routes
pub fn routes() -> Router<LearningState> {
    Router::new()
        .merge(generation_routes())
        .merge(bundle_routes())
}
