//! Studyforge application composition root
//!
//! Composes the domain routers into a single application. Stores, the LLM
//! service and the auth backend are built here and injected into each
//! domain's state; nothing reads provider configuration globally.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use studyforge_accounts::{AccountRepository, AccountUsageStore, AccountsState};
use studyforge_auth::{AuthBackend, AuthConfig};
use studyforge_common::Config;
use studyforge_learning::{
    ArtifactStore, BundleRepository, ContentConfig, ContentProviderClient,
    GenerationOrchestrator, LearningState,
};
use studyforge_llm::{LlmConfig, LlmService, LlmServiceFactory};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Request bodies are tiny JSON documents
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Everything the routers need, already constructed
#[derive(Clone)]
pub struct AppServices {
    pub accounts: Arc<dyn AccountUsageStore>,
    pub artifacts: Arc<dyn ArtifactStore>,
    pub llm: Arc<dyn LlmService>,
    pub auth: AuthBackend,
    pub content: ContentConfig,
}

/// Create the main application router backed by Postgres and the
/// configured LLM provider
pub async fn create_app(config: Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let auth = AuthBackend::new(AuthConfig {
        jwt_secret: config.jwt_secret.clone(),
        issuer: config.jwt_issuer.clone(),
        audience: config.jwt_audience.clone(),
    });

    let llm_config = LlmConfig::from_env()?;
    tracing::info!(provider = %llm_config.provider, model = %llm_config.default_model, "LLM configured");
    if llm_config.is_mock() {
        tracing::warn!(
            "LLM_PROVIDER is mock; generations will fail until a real provider is configured"
        );
    }
    let llm: Arc<dyn LlmService> = Arc::from(LlmServiceFactory::create(llm_config)?);

    let services = AppServices {
        accounts: Arc::new(AccountRepository::new(pool.clone())),
        artifacts: Arc::new(BundleRepository::new(pool)),
        llm,
        auth,
        content: ContentConfig::from_env(),
    };

    Ok(build_router(services))
}

/// Compose domain routers with shared infrastructure routes
pub fn build_router(services: AppServices) -> Router {
    let provider = ContentProviderClient::new(services.llm.clone(), services.content.clone());
    let orchestrator = GenerationOrchestrator::new(
        services.accounts.clone(),
        services.artifacts.clone(),
        provider,
    );

    let accounts_state = AccountsState {
        accounts: services.accounts,
        auth: services.auth.clone(),
    };

    let learning_state = LearningState {
        orchestrator,
        artifacts: services.artifacts,
        auth: services.auth,
    };

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Studyforge API v0.0.1-SNAPSHOT" }),
        )
        .merge(studyforge_accounts::routes().with_state(accounts_state))
        .merge(studyforge_learning::routes().with_state(learning_state))
        .layer(body_limit_layer())
}

/// CORS from a comma separated origin list; `*` allows any origin
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let origins: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| {
            if o == "*" {
                return None;
            }
            match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            }
        })
        .collect();

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn body_limit_layer() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_BODY_BYTES)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
