//! Learning domain: artifact bundles, content generation, quota-gated orchestration

pub mod api;
pub mod domain;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::artifacts::*;
pub use domain::entities::{validate_topic, ArtifactBundle, BundleSummary, MAX_TOPIC_CHARS};

// Re-export repository types
#[cfg(any(test, feature = "test-support"))]
pub use repository::InMemoryArtifactStore;
pub use repository::{ArtifactStore, BundleRepository};

// Re-export services
pub use service::orchestrator::{GeneratedContent, GenerationError, GenerationOrchestrator};
pub use service::provider::{build_request, ContentConfig, ContentProviderClient, ProviderError};

// Re-export API types
pub use api::routes;
pub use api::LearningState;
