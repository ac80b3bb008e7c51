use async_trait::async_trait;
use tracing::Instrument;

use oauth2_core::{
    AccessToken, AuthorizationCode, Client, ClientDetails, ClientKey, Jti, RefreshToken,
    StorageError, User, UserDetails,
};
use oauth2_ports::{DynStorage, Storage};

/// A thin wrapper around a `DynStorage` that creates a tracing span for each
/// storage call.
///
/// Tokens, codes, and assertion ids are logged as 12-character prefixes
/// plus their length; secrets and passwords are never logged at all.
pub struct ObservedStorage {
    inner: DynStorage,
    db_system: String,
}

impl ObservedStorage {
    pub fn new(inner: DynStorage, db_system: String) -> Self {
        Self { inner, db_system }
    }

    fn span(&self, operation: &'static str) -> tracing::Span {
        tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = operation
        )
    }

    fn prefix(value: &str) -> String {
        value.chars().take(12).collect::<String>()
    }
}

#[async_trait]
impl Storage for ObservedStorage {
    async fn init(&self) -> Result<(), StorageError> {
        let span = self.span("init");
        async move { self.inner.init().await }.instrument(span).await
    }

    async fn get_authorization_code(
        &self,
        code: &str,
    ) -> Result<Option<AuthorizationCode>, StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "get_authorization_code",
            code_prefix = %Self::prefix(code),
            code_len = code.len()
        );
        async move { self.inner.get_authorization_code(code).await }
            .instrument(span)
            .await
    }

    async fn set_authorization_code(&self, code: &AuthorizationCode) -> Result<(), StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "set_authorization_code",
            code_prefix = %Self::prefix(&code.code),
            client_id = %code.client_id,
            user_id = %code.user_id
        );
        async move { self.inner.set_authorization_code(code).await }
            .instrument(span)
            .await
    }

    async fn expire_authorization_code(&self, code: &str) -> Result<(), StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "expire_authorization_code",
            code_prefix = %Self::prefix(code),
            code_len = code.len()
        );
        async move { self.inner.expire_authorization_code(code).await }
            .instrument(span)
            .await
    }

    async fn get_access_token(
        &self,
        access_token: &str,
    ) -> Result<Option<AccessToken>, StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "get_access_token",
            token_prefix = %Self::prefix(access_token),
            token_len = access_token.len()
        );
        async move { self.inner.get_access_token(access_token).await }
            .instrument(span)
            .await
    }

    async fn set_access_token(&self, token: &AccessToken) -> Result<(), StorageError> {
        // Never log full tokens.
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "set_access_token",
            token_prefix = %Self::prefix(&token.access_token),
            client_id = %token.client_id,
            user_id = %token.user_id.as_deref().unwrap_or("")
        );
        async move { self.inner.set_access_token(token).await }
            .instrument(span)
            .await
    }

    async fn get_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<RefreshToken>, StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "get_refresh_token",
            token_prefix = %Self::prefix(refresh_token),
            token_len = refresh_token.len()
        );
        async move { self.inner.get_refresh_token(refresh_token).await }
            .instrument(span)
            .await
    }

    async fn set_refresh_token(&self, token: &RefreshToken) -> Result<(), StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "set_refresh_token",
            token_prefix = %Self::prefix(&token.refresh_token),
            client_id = %token.client_id,
            user_id = %token.user_id
        );
        async move { self.inner.set_refresh_token(token).await }
            .instrument(span)
            .await
    }

    async fn unset_refresh_token(&self, refresh_token: &str) -> Result<(), StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "unset_refresh_token",
            token_prefix = %Self::prefix(refresh_token),
            token_len = refresh_token.len()
        );
        async move { self.inner.unset_refresh_token(refresh_token).await }
            .instrument(span)
            .await
    }

    async fn get_client_details(
        &self,
        client_id: &str,
    ) -> Result<Option<ClientDetails>, StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "get_client_details",
            client_id = %client_id
        );
        async move { self.inner.get_client_details(client_id).await }
            .instrument(span)
            .await
    }

    async fn set_client_details(&self, client: &Client) -> Result<(), StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "set_client_details",
            client_id = %client.client_id
        );
        async move { self.inner.set_client_details(client).await }
            .instrument(span)
            .await
    }

    async fn check_client_credentials(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<bool, StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "check_client_credentials",
            client_id = %client_id
        );
        async move {
            self.inner
                .check_client_credentials(client_id, client_secret)
                .await
        }
        .instrument(span)
        .await
    }

    async fn is_public_client(&self, client_id: &str) -> Result<bool, StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "is_public_client",
            client_id = %client_id
        );
        async move { self.inner.is_public_client(client_id).await }
            .instrument(span)
            .await
    }

    async fn check_restricted_grant_type(
        &self,
        client_id: &str,
        grant_type: &str,
    ) -> Result<bool, StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "check_restricted_grant_type",
            client_id = %client_id,
            grant_type = %grant_type
        );
        async move {
            self.inner
                .check_restricted_grant_type(client_id, grant_type)
                .await
        }
        .instrument(span)
        .await
    }

    async fn get_client_scope(&self, client_id: &str) -> Result<String, StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "get_client_scope",
            client_id = %client_id
        );
        async move { self.inner.get_client_scope(client_id).await }
            .instrument(span)
            .await
    }

    async fn get_user_details(&self, username: &str) -> Result<Option<UserDetails>, StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "get_user_details",
            username = %username
        );
        async move { self.inner.get_user_details(username).await }
            .instrument(span)
            .await
    }

    async fn set_user(&self, user: &User) -> Result<(), StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "set_user",
            username = %user.username
        );
        async move { self.inner.set_user(user).await }
            .instrument(span)
            .await
    }

    async fn check_user_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "check_user_credentials",
            username = %username
        );
        async move { self.inner.check_user_credentials(username, password).await }
            .instrument(span)
            .await
    }

    async fn get_client_key(
        &self,
        client_id: &str,
        subject: &str,
    ) -> Result<Option<String>, StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "get_client_key",
            client_id = %client_id,
            subject = %subject
        );
        async move { self.inner.get_client_key(client_id, subject).await }
            .instrument(span)
            .await
    }

    async fn set_client_key(&self, key: &ClientKey) -> Result<(), StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "set_client_key",
            client_id = %key.client_id,
            subject = %key.subject
        );
        async move { self.inner.set_client_key(key).await }
            .instrument(span)
            .await
    }

    async fn get_jti(
        &self,
        client_id: &str,
        subject: &str,
        audience: &str,
        expires: i64,
        jti: &str,
    ) -> Result<Option<Jti>, StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "get_jti",
            client_id = %client_id,
            subject = %subject,
            jti_prefix = %Self::prefix(jti)
        );
        async move {
            self.inner
                .get_jti(client_id, subject, audience, expires, jti)
                .await
        }
        .instrument(span)
        .await
    }

    async fn set_jti(&self, jti: &Jti) -> Result<(), StorageError> {
        let span = tracing::info_span!(
            "db",
            db_system = %self.db_system,
            db_operation = "set_jti",
            client_id = %jti.client_id,
            subject = %jti.subject,
            jti_prefix = %Self::prefix(&jti.jti)
        );
        async move { self.inner.set_jti(jti).await }
            .instrument(span)
            .await
    }

    async fn healthcheck(&self) -> Result<(), StorageError> {
        let span = self.span("healthcheck");
        async move { self.inner.healthcheck().await }
            .instrument(span)
            .await
    }
}
