//! Authentication backend
//!
//! Holds the token verification settings. Domain states expose it via
//! `FromRef` so the extractors can find it:
//! ```ignore
//! impl FromRef<MyDomainState> for AuthBackend {
//!     fn from_ref(state: &MyDomainState) -> Self {
//!         state.auth.clone()
//!     }
//! }
//! ```

use uuid::Uuid;

use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::validate_jwt_token;

#[derive(Clone, Debug)]
pub struct AuthBackend {
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Verify a bearer token and build the caller's context.
    ///
    /// Whether the account actually exists is decided by the domain that
    /// loads it; a token for a deleted account still authenticates here.
    pub fn authenticate_jwt(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = validate_jwt_token(token, &self.config)?;

        let account_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            tracing::debug!(sub = %claims.sub, "Token subject is not a UUID");
            AuthError::InvalidAccountId
        })?;

        Ok(AuthContext::new(account_id, claims.email))
    }
}
