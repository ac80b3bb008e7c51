use serde::{Deserialize, Serialize};

/// A resource-owner record, as written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// PHC-format hash produced by
    /// [`crate::credentials::hash_user_password`].
    pub password_hash: String,
    pub scope: Option<String>,
}

impl User {
    pub fn new(username: String, password_hash: String, scope: Option<String>) -> Self {
        Self {
            username,
            password_hash,
            scope,
        }
    }
}

/// The user record as read back by callers. The password hash is never
/// part of this shape; credential checks go through the storage port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetails {
    pub user_id: String,
    pub scope: Option<String>,
}
