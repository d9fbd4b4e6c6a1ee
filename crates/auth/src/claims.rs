//! JWT claims types

use serde::{Deserialize, Serialize};

/// Claims carried by access tokens from the identity service
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountClaims {
    /// Subject (account ID)
    pub sub: String,
    pub email: Option<String>,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}
