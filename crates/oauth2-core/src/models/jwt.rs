use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public key registered for JWT-bearer client authentication, keyed by
/// `(client_id, subject)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientKey {
    pub client_id: String,
    pub subject: String,
    pub public_key: String,
}

impl ClientKey {
    pub fn new(client_id: String, subject: String, public_key: String) -> Self {
        Self {
            client_id,
            subject,
            public_key,
        }
    }
}

/// A used JWT assertion identifier. Existence of a record with the same
/// five fields means the assertion is a replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jti {
    pub client_id: String,
    pub subject: String,
    pub audience: String,
    /// Assertion expiry as a whole-second Unix timestamp.
    pub expires: i64,
    pub jti: String,
}

impl Jti {
    pub fn new(
        client_id: String,
        subject: String,
        audience: String,
        expires: i64,
        jti: String,
    ) -> Self {
        Self {
            client_id,
            subject,
            audience,
            expires,
            jti,
        }
    }

    pub fn expires_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires, 0)
    }
}
