//! Authentication middleware for the Studyforge API
//!
//! Accounts are issued and signed in by an external identity service; this
//! crate only verifies the bearer token and hands the account id to
//! handlers. Extractors work with any domain state implementing
//! `FromRef<S>` for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod jwt;

pub use backend::AuthBackend;
pub use claims::AccountClaims;
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::AuthUser;
