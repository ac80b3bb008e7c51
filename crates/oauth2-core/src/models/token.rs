use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bearer access token.
///
/// `user_id` is absent for tokens issued without a resource owner
/// (client credentials grant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub client_id: String,
    pub user_id: Option<String>,
    /// Expiry as a whole-second Unix timestamp.
    pub expires: i64,
    pub scope: Option<String>,
}

impl AccessToken {
    pub fn new(
        access_token: String,
        client_id: String,
        user_id: Option<String>,
        expires: i64,
        scope: Option<String>,
    ) -> Self {
        Self {
            access_token,
            client_id,
            user_id,
            expires,
            scope,
        }
    }

    pub fn expires_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires, 0)
    }
}

/// A refresh token. Deleted on rotation; an absent token means the grant
/// carries no refresh capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshToken {
    pub refresh_token: String,
    pub client_id: String,
    pub user_id: String,
    /// Expiry as a whole-second Unix timestamp.
    pub expires: i64,
    pub scope: Option<String>,
}

impl RefreshToken {
    pub fn new(
        refresh_token: String,
        client_id: String,
        user_id: String,
        expires: i64,
        scope: Option<String>,
    ) -> Self {
        Self {
            refresh_token,
            client_id,
            user_id,
            expires,
            scope,
        }
    }

    pub fn expires_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires, 0)
    }
}
