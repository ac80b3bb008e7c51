//! Persisted document shapes and their mapping to the domain records.
//!
//! Two transforms live here and nowhere else:
//! - scope (and client redirect URIs) are persisted as ordered lists of
//!   strings and exposed as a single space-separated string;
//! - expirations are persisted as millisecond-precision BSON datetimes and
//!   exposed as whole-second Unix timestamps, truncating sub-second
//!   precision on read.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use oauth2_core::models::scope;
use oauth2_core::{
    AccessToken, AuthorizationCode, Client, ClientDetails, ClientKey, Jti, RefreshToken, User,
    UserDetails,
};

pub(crate) fn expires_to_datetime(expires: i64) -> DateTime {
    DateTime::from_millis(expires * 1000)
}

pub(crate) fn datetime_to_expires(datetime: DateTime) -> i64 {
    datetime.timestamp_millis() / 1000
}

fn split_opt(scope: Option<&str>) -> Vec<String> {
    scope.map(scope::split_scopes).unwrap_or_default()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AuthorizationCodeDoc {
    pub code: String,
    pub client_id: String,
    pub user_id: String,
    pub redirect_uri: String,
    pub expires: DateTime,
    #[serde(default)]
    pub scope: Vec<String>,
}

impl AuthorizationCodeDoc {
    pub fn from_record(record: &AuthorizationCode) -> Self {
        Self {
            code: record.code.clone(),
            client_id: record.client_id.clone(),
            user_id: record.user_id.clone(),
            redirect_uri: record.redirect_uri.clone(),
            expires: expires_to_datetime(record.expires),
            scope: split_opt(record.scope.as_deref()),
        }
    }

    pub fn into_record(self) -> AuthorizationCode {
        AuthorizationCode {
            code: self.code,
            client_id: self.client_id,
            user_id: self.user_id,
            redirect_uri: self.redirect_uri,
            expires: datetime_to_expires(self.expires),
            scope: scope::join_scopes(&self.scope),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AccessTokenDoc {
    pub access_token: String,
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub expires: DateTime,
    #[serde(default)]
    pub scope: Vec<String>,
}

impl AccessTokenDoc {
    pub fn from_record(record: &AccessToken) -> Self {
        Self {
            access_token: record.access_token.clone(),
            client_id: record.client_id.clone(),
            user_id: record.user_id.clone(),
            expires: expires_to_datetime(record.expires),
            scope: split_opt(record.scope.as_deref()),
        }
    }

    pub fn into_record(self) -> AccessToken {
        AccessToken {
            access_token: self.access_token,
            client_id: self.client_id,
            user_id: self.user_id,
            expires: datetime_to_expires(self.expires),
            scope: scope::join_scopes(&self.scope),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RefreshTokenDoc {
    pub refresh_token: String,
    pub client_id: String,
    pub user_id: String,
    pub expires: DateTime,
    #[serde(default)]
    pub scope: Vec<String>,
}

impl RefreshTokenDoc {
    pub fn from_record(record: &RefreshToken) -> Self {
        Self {
            refresh_token: record.refresh_token.clone(),
            client_id: record.client_id.clone(),
            user_id: record.user_id.clone(),
            expires: expires_to_datetime(record.expires),
            scope: split_opt(record.scope.as_deref()),
        }
    }

    pub fn into_record(self) -> RefreshToken {
        RefreshToken {
            refresh_token: self.refresh_token,
            client_id: self.client_id,
            user_id: self.user_id,
            expires: datetime_to_expires(self.expires),
            scope: scope::join_scopes(&self.scope),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ClientDoc {
    pub client_id: String,
    /// Absent for public clients. Omitted from the document rather than
    /// stored as null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    #[serde(default)]
    pub grant_types: Vec<String>,
    #[serde(default)]
    pub scope: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ClientDoc {
    pub fn from_record(record: &Client) -> Self {
        Self {
            client_id: record.client_id.clone(),
            client_secret: record.client_secret.clone(),
            redirect_uris: record.redirect_uris.clone(),
            grant_types: record.grant_types.clone(),
            scope: split_opt(record.scope.as_deref()),
            user_id: record.user_id.clone(),
        }
    }

    /// Map to the read shape. `client_id` is copied from the lookup key, so
    /// the result always reflects the identifier the caller searched for.
    pub fn into_details(self, client_id: &str) -> ClientDetails {
        let redirect_uri = if self.redirect_uris.is_empty() {
            None
        } else {
            Some(self.redirect_uris.join(" "))
        };

        ClientDetails {
            client_id: client_id.to_string(),
            redirect_uri,
            grant_types: self.grant_types,
            scope: scope::join_scopes(&self.scope),
            user_id: self.user_id,
        }
    }

    pub fn is_public(&self) -> bool {
        match &self.client_secret {
            None => true,
            Some(secret) => secret.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UserDoc {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub scope: Vec<String>,
}

impl UserDoc {
    pub fn from_record(record: &User) -> Self {
        Self {
            username: record.username.clone(),
            password: record.password_hash.clone(),
            scope: split_opt(record.scope.as_deref()),
        }
    }

    /// Map to the read shape; `user_id` is copied from the lookup key.
    pub fn into_details(self, username: &str) -> UserDetails {
        UserDetails {
            user_id: username.to_string(),
            scope: scope::join_scopes(&self.scope),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ClientKeyDoc {
    pub client_id: String,
    pub subject: String,
    pub public_key: String,
}

impl ClientKeyDoc {
    pub fn from_record(record: &ClientKey) -> Self {
        Self {
            client_id: record.client_id.clone(),
            subject: record.subject.clone(),
            public_key: record.public_key.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct JtiDoc {
    pub client_id: String,
    pub subject: String,
    pub audience: String,
    pub expires: DateTime,
    pub jti: String,
}

impl JtiDoc {
    pub fn from_record(record: &Jti) -> Self {
        Self {
            client_id: record.client_id.clone(),
            subject: record.subject.clone(),
            audience: record.audience.clone(),
            expires: expires_to_datetime(record.expires),
            jti: record.jti.clone(),
        }
    }

    pub fn into_record(self) -> Jti {
        Jti {
            client_id: self.client_id,
            subject: self.subject,
            audience: self.audience,
            expires: datetime_to_expires(self.expires),
            jti: self.jti,
        }
    }
}
