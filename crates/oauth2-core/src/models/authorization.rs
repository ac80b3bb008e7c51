use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single-use authorization code, exchanged once for an access token and
/// then deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationCode {
    pub code: String,
    pub client_id: String,
    pub user_id: String,
    pub redirect_uri: String,
    /// Expiry as a whole-second Unix timestamp.
    pub expires: i64,
    /// Space-separated scope string, absent when no scope was granted.
    pub scope: Option<String>,
}

impl AuthorizationCode {
    pub fn new(
        code: String,
        client_id: String,
        user_id: String,
        redirect_uri: String,
        expires: i64,
        scope: Option<String>,
    ) -> Self {
        Self {
            code,
            client_id,
            user_id,
            redirect_uri,
            expires,
            scope,
        }
    }

    pub fn expires_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires, 0)
    }
}
