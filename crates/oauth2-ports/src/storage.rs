use async_trait::async_trait;
use std::sync::Arc;

use oauth2_core::{
    AccessToken, AuthorizationCode, Client, ClientDetails, ClientKey, Jti, RefreshToken,
    StorageError, User, UserDetails,
};

/// Trait implemented by persistence backends.
///
/// Every operation is a single keyed lookup, insert, or delete. Lookups
/// report absence as `Ok(None)` (or `Ok(false)` / an empty string for the
/// predicate and scope operations), never as an `Err`; errors are reserved
/// for failures of the backing store itself.
///
/// Writes are unconditional inserts: writing an existing key surfaces the
/// store's duplicate-key error. Deletes of absent keys are no-ops.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initialize the backing store (e.g., check connectivity and create
    /// unique indexes).
    async fn init(&self) -> Result<(), StorageError>;

    // Authorization code operations.
    // Codes are single-use: the caller is expected to expire a code as soon
    // as it has been exchanged.
    async fn get_authorization_code(
        &self,
        code: &str,
    ) -> Result<Option<AuthorizationCode>, StorageError>;
    async fn set_authorization_code(&self, code: &AuthorizationCode) -> Result<(), StorageError>;
    async fn expire_authorization_code(&self, code: &str) -> Result<(), StorageError>;

    // Access token operations. Tokens are never deleted here; expired
    // tokens are left to the store's own TTL mechanisms.
    async fn get_access_token(
        &self,
        access_token: &str,
    ) -> Result<Option<AccessToken>, StorageError>;
    async fn set_access_token(&self, token: &AccessToken) -> Result<(), StorageError>;

    // Refresh token operations. Deleted on rotation.
    async fn get_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<RefreshToken>, StorageError>;
    async fn set_refresh_token(&self, token: &RefreshToken) -> Result<(), StorageError>;
    async fn unset_refresh_token(&self, refresh_token: &str) -> Result<(), StorageError>;

    // Client operations.
    async fn get_client_details(
        &self,
        client_id: &str,
    ) -> Result<Option<ClientDetails>, StorageError>;
    async fn set_client_details(&self, client: &Client) -> Result<(), StorageError>;

    /// True iff the client exists and the presented secret verifies against
    /// its stored hash. Unknown client and bad secret are indistinguishable.
    async fn check_client_credentials(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<bool, StorageError>;

    /// True iff the client exists and has no stored secret.
    async fn is_public_client(&self, client_id: &str) -> Result<bool, StorageError>;

    /// True iff the client exists and `grant_type` is one of its registered
    /// grant types.
    async fn check_restricted_grant_type(
        &self,
        client_id: &str,
        grant_type: &str,
    ) -> Result<bool, StorageError>;

    /// The client's scope as a space-separated string; empty when the
    /// client is unknown or has no scope.
    async fn get_client_scope(&self, client_id: &str) -> Result<String, StorageError>;

    // User operations.
    async fn get_user_details(&self, username: &str) -> Result<Option<UserDetails>, StorageError>;
    async fn set_user(&self, user: &User) -> Result<(), StorageError>;
    async fn check_user_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, StorageError>;

    // JWT-bearer key operations, keyed by (client_id, subject).
    async fn get_client_key(
        &self,
        client_id: &str,
        subject: &str,
    ) -> Result<Option<String>, StorageError>;
    async fn set_client_key(&self, key: &ClientKey) -> Result<(), StorageError>;

    // JTI replay records. A match on all five fields means the assertion
    // was already used.
    async fn get_jti(
        &self,
        client_id: &str,
        subject: &str,
        audience: &str,
        expires: i64,
        jti: &str,
    ) -> Result<Option<Jti>, StorageError>;
    async fn set_jti(&self, jti: &Jti) -> Result<(), StorageError>;

    /// Lightweight liveness/readiness check.
    ///
    /// Implementations may override to do something cheaper than `init()`.
    async fn healthcheck(&self) -> Result<(), StorageError> {
        self.init().await
    }
}

pub type DynStorage = Arc<dyn Storage>;
