//! Learning domain state and auth backend integration

use crate::repository::ArtifactStore;
use crate::service::orchestrator::GenerationOrchestrator;
use axum::extract::FromRef;
use std::sync::Arc;
use studyforge_auth::AuthBackend;

/// Application state for the Learning domain
#[derive(Clone)]
pub struct LearningState {
    pub orchestrator: GenerationOrchestrator,
    pub artifacts: Arc<dyn ArtifactStore>,
    pub auth: AuthBackend,
}

impl FromRef<LearningState> for AuthBackend {
    fn from_ref(state: &LearningState) -> Self {
        state.auth.clone()
    }
}
