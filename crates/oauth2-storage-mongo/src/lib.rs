use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::{ClientOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};

use oauth2_core::{
    credentials, AccessToken, AuthorizationCode, Client, ClientDetails, ClientKey, Jti,
    RefreshToken, StorageError, User, UserDetails,
};
use oauth2_ports::Storage;

mod config;
mod documents;

pub use config::CollectionConfig;

use documents::{
    expires_to_datetime, AccessTokenDoc, AuthorizationCodeDoc, ClientDoc, ClientKeyDoc, JtiDoc,
    RefreshTokenDoc, UserDoc,
};

/// MongoDB-backed storage implementation.
///
/// Notes:
/// - Every operation is exactly one driver call; driver errors propagate
///   after classification, with no retries and no added deadlines.
/// - Document shapes live in the `documents` module; collection names come
///   from the [`CollectionConfig`] fixed at construction.
/// - Uses unique indexes on each natural key and on the two compound keys,
///   created by `init()`.
pub struct MongoStorage {
    db: Database,
    authorization_codes: Collection<AuthorizationCodeDoc>,
    access_tokens: Collection<AccessTokenDoc>,
    refresh_tokens: Collection<RefreshTokenDoc>,
    clients: Collection<ClientDoc>,
    users: Collection<UserDoc>,
    client_keys: Collection<ClientKeyDoc>,
    jti: Collection<JtiDoc>,
}

impl MongoStorage {
    /// Connect using the default `oauth_*` collection names.
    pub async fn new(uri: &str) -> Result<Self, StorageError> {
        Self::with_config(uri, CollectionConfig::default()).await
    }

    pub async fn with_config(uri: &str, config: CollectionConfig) -> Result<Self, StorageError> {
        let mut opts = ClientOptions::parse(uri)
            .await
            .map_err(Self::mongo_err_to_storage)?;
        if opts.app_name.is_none() {
            opts.app_name = Some("oauth2-storage-mongo".to_string());
        }

        let client = MongoClient::with_options(opts).map_err(Self::mongo_err_to_storage)?;

        // If URI doesn't specify a database, fall back to "oauth2".
        let db_name = client
            .default_database()
            .map(|d| d.name().to_string())
            .unwrap_or_else(|| "oauth2".to_string());

        let db = client.database(&db_name);

        let authorization_codes =
            db.collection::<AuthorizationCodeDoc>(&config.authorization_codes);
        let access_tokens = db.collection::<AccessTokenDoc>(&config.access_tokens);
        let refresh_tokens = db.collection::<RefreshTokenDoc>(&config.refresh_tokens);
        let clients = db.collection::<ClientDoc>(&config.clients);
        let users = db.collection::<UserDoc>(&config.users);
        let client_keys = db.collection::<ClientKeyDoc>(&config.client_keys);
        let jti = db.collection::<JtiDoc>(&config.jti);

        Ok(Self {
            db,
            authorization_codes,
            access_tokens,
            refresh_tokens,
            clients,
            users,
            client_keys,
            jti,
        })
    }

    async fn ensure_indexes(&self) -> Result<(), StorageError> {
        // authorization_codes.code unique
        self.authorization_codes
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "code": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
                None,
            )
            .await
            .map_err(Self::mongo_err_to_storage)?;

        // access_tokens.access_token unique
        self.access_tokens
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "access_token": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
                None,
            )
            .await
            .map_err(Self::mongo_err_to_storage)?;

        // refresh_tokens.refresh_token unique
        self.refresh_tokens
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "refresh_token": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
                None,
            )
            .await
            .map_err(Self::mongo_err_to_storage)?;

        // clients.client_id unique
        self.clients
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "client_id": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
                None,
            )
            .await
            .map_err(Self::mongo_err_to_storage)?;

        // users.username unique
        self.users
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "username": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
                None,
            )
            .await
            .map_err(Self::mongo_err_to_storage)?;

        // client_keys (client_id, subject) unique
        self.client_keys
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "client_id": 1, "subject": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
                None,
            )
            .await
            .map_err(Self::mongo_err_to_storage)?;

        // jti: the full replay identity is the key
        self.jti
            .create_index(
                IndexModel::builder()
                    .keys(doc! {
                        "client_id": 1,
                        "subject": 1,
                        "audience": 1,
                        "expires": 1,
                        "jti": 1,
                    })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
                None,
            )
            .await
            .map_err(Self::mongo_err_to_storage)?;

        Ok(())
    }

    fn duplicate_key_error(err: &mongodb::error::Error) -> bool {
        // Canonical server-side message includes "E11000".
        err.to_string().contains("E11000")
    }

    fn mongo_err_to_storage(err: mongodb::error::Error) -> StorageError {
        if Self::duplicate_key_error(&err) {
            return StorageError::duplicate_key(&err.to_string());
        }

        StorageError::server_error(&err.to_string())
    }
}

#[async_trait]
impl Storage for MongoStorage {
    async fn init(&self) -> Result<(), StorageError> {
        self.db
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(Self::mongo_err_to_storage)?;
        self.ensure_indexes().await
    }

    async fn get_authorization_code(
        &self,
        code: &str,
    ) -> Result<Option<AuthorizationCode>, StorageError> {
        self.authorization_codes
            .find_one(doc! { "code": code }, None)
            .await
            .map(|found| found.map(AuthorizationCodeDoc::into_record))
            .map_err(Self::mongo_err_to_storage)
    }

    async fn set_authorization_code(&self, code: &AuthorizationCode) -> Result<(), StorageError> {
        self.authorization_codes
            .insert_one(AuthorizationCodeDoc::from_record(code), None)
            .await
            .map(|_| ())
            .map_err(Self::mongo_err_to_storage)
    }

    async fn expire_authorization_code(&self, code: &str) -> Result<(), StorageError> {
        // Deleting an absent code is a no-op.
        self.authorization_codes
            .delete_one(doc! { "code": code }, None)
            .await
            .map(|_| ())
            .map_err(Self::mongo_err_to_storage)
    }

    async fn get_access_token(
        &self,
        access_token: &str,
    ) -> Result<Option<AccessToken>, StorageError> {
        self.access_tokens
            .find_one(doc! { "access_token": access_token }, None)
            .await
            .map(|found| found.map(AccessTokenDoc::into_record))
            .map_err(Self::mongo_err_to_storage)
    }

    async fn set_access_token(&self, token: &AccessToken) -> Result<(), StorageError> {
        self.access_tokens
            .insert_one(AccessTokenDoc::from_record(token), None)
            .await
            .map(|_| ())
            .map_err(Self::mongo_err_to_storage)
    }

    async fn get_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<RefreshToken>, StorageError> {
        self.refresh_tokens
            .find_one(doc! { "refresh_token": refresh_token }, None)
            .await
            .map(|found| found.map(RefreshTokenDoc::into_record))
            .map_err(Self::mongo_err_to_storage)
    }

    async fn set_refresh_token(&self, token: &RefreshToken) -> Result<(), StorageError> {
        self.refresh_tokens
            .insert_one(RefreshTokenDoc::from_record(token), None)
            .await
            .map(|_| ())
            .map_err(Self::mongo_err_to_storage)
    }

    async fn unset_refresh_token(&self, refresh_token: &str) -> Result<(), StorageError> {
        self.refresh_tokens
            .delete_one(doc! { "refresh_token": refresh_token }, None)
            .await
            .map(|_| ())
            .map_err(Self::mongo_err_to_storage)
    }

    async fn get_client_details(
        &self,
        client_id: &str,
    ) -> Result<Option<ClientDetails>, StorageError> {
        self.clients
            .find_one(doc! { "client_id": client_id }, None)
            .await
            .map(|found| found.map(|client| client.into_details(client_id)))
            .map_err(Self::mongo_err_to_storage)
    }

    async fn set_client_details(&self, client: &Client) -> Result<(), StorageError> {
        self.clients
            .insert_one(ClientDoc::from_record(client), None)
            .await
            .map(|_| ())
            .map_err(Self::mongo_err_to_storage)
    }

    async fn check_client_credentials(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<bool, StorageError> {
        let found = self
            .clients
            .find_one(doc! { "client_id": client_id }, None)
            .await
            .map_err(Self::mongo_err_to_storage)?;

        // Unknown client, public client, and hash mismatch all collapse to
        // `false`.
        Ok(match found.and_then(|client| client.client_secret) {
            Some(hash) => credentials::verify_credential(client_id, client_secret, &hash),
            None => false,
        })
    }

    async fn is_public_client(&self, client_id: &str) -> Result<bool, StorageError> {
        self.clients
            .find_one(doc! { "client_id": client_id }, None)
            .await
            .map(|found| found.map(|client| client.is_public()).unwrap_or(false))
            .map_err(Self::mongo_err_to_storage)
    }

    async fn check_restricted_grant_type(
        &self,
        client_id: &str,
        grant_type: &str,
    ) -> Result<bool, StorageError> {
        self.clients
            .find_one(doc! { "client_id": client_id }, None)
            .await
            .map(|found| match found {
                Some(client) => client.grant_types.iter().any(|g| g == grant_type),
                None => false,
            })
            .map_err(Self::mongo_err_to_storage)
    }

    async fn get_client_scope(&self, client_id: &str) -> Result<String, StorageError> {
        let found = self
            .clients
            .find_one(doc! { "client_id": client_id }, None)
            .await
            .map_err(Self::mongo_err_to_storage)?;

        Ok(found
            .map(|client| client.scope.join(" "))
            .unwrap_or_default())
    }

    async fn get_user_details(&self, username: &str) -> Result<Option<UserDetails>, StorageError> {
        self.users
            .find_one(doc! { "username": username }, None)
            .await
            .map(|found| found.map(|user| user.into_details(username)))
            .map_err(Self::mongo_err_to_storage)
    }

    async fn set_user(&self, user: &User) -> Result<(), StorageError> {
        self.users
            .insert_one(UserDoc::from_record(user), None)
            .await
            .map(|_| ())
            .map_err(Self::mongo_err_to_storage)
    }

    async fn check_user_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, StorageError> {
        let found = self
            .users
            .find_one(doc! { "username": username }, None)
            .await
            .map_err(Self::mongo_err_to_storage)?;

        Ok(match found {
            Some(user) => credentials::verify_credential(username, password, &user.password),
            None => false,
        })
    }

    async fn get_client_key(
        &self,
        client_id: &str,
        subject: &str,
    ) -> Result<Option<String>, StorageError> {
        self.client_keys
            .find_one(doc! { "client_id": client_id, "subject": subject }, None)
            .await
            .map(|found| found.map(|key| key.public_key))
            .map_err(Self::mongo_err_to_storage)
    }

    async fn set_client_key(&self, key: &ClientKey) -> Result<(), StorageError> {
        self.client_keys
            .insert_one(ClientKeyDoc::from_record(key), None)
            .await
            .map(|_| ())
            .map_err(Self::mongo_err_to_storage)
    }

    async fn get_jti(
        &self,
        client_id: &str,
        subject: &str,
        audience: &str,
        expires: i64,
        jti: &str,
    ) -> Result<Option<Jti>, StorageError> {
        self.jti
            .find_one(
                doc! {
                    "client_id": client_id,
                    "subject": subject,
                    "audience": audience,
                    "expires": expires_to_datetime(expires),
                    "jti": jti,
                },
                None,
            )
            .await
            .map(|found| found.map(JtiDoc::into_record))
            .map_err(Self::mongo_err_to_storage)
    }

    async fn set_jti(&self, jti: &Jti) -> Result<(), StorageError> {
        self.jti
            .insert_one(JtiDoc::from_record(jti), None)
            .await
            .map(|_| ())
            .map_err(Self::mongo_err_to_storage)
    }

    async fn healthcheck(&self) -> Result<(), StorageError> {
        self.db
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map(|_| ())
            .map_err(Self::mongo_err_to_storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn client_doc_omits_secret_when_none() {
        let client = Client::new(
            "public_client".to_string(),
            None,
            vec!["/cb".to_string()],
            vec!["authorization_code".to_string()],
            None,
            None,
        );

        let doc = bson::to_document(&ClientDoc::from_record(&client))
            .expect("client should serialize to bson document");
        assert!(
            !doc.contains_key("client_secret"),
            "client_secret should be omitted when None"
        );
    }

    #[test]
    fn access_token_doc_stores_expiry_as_datetime() {
        let token = AccessToken::new(
            "access".to_string(),
            "client".to_string(),
            None,
            1_700_000_000,
            Some("read".to_string()),
        );

        let doc = bson::to_document(&AccessTokenDoc::from_record(&token))
            .expect("token should serialize to bson document");
        assert!(
            matches!(doc.get("expires"), Some(bson::Bson::DateTime(_))),
            "expires should be stored as a BSON datetime"
        );
        assert!(
            !doc.contains_key("user_id"),
            "user_id should be omitted when None"
        );
    }
}
