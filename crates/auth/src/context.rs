//! Authorization context for authenticated callers

use uuid::Uuid;

/// The authenticated caller
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub account_id: Uuid,
    pub email: Option<String>,
}

impl AuthContext {
    pub fn new(account_id: Uuid, email: Option<String>) -> Self {
        Self { account_id, email }
    }

    /// Whether the caller owns a resource belonging to `owner_id`
    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.account_id == owner_id
    }
}
