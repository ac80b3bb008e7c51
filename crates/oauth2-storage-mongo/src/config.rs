/// Collection names used by [`crate::MongoStorage`].
///
/// The configuration is an immutable value fixed at construction; defaults
/// are applied when the value is built, never per call. Override any
/// subset with struct-update syntax:
///
/// ```
/// use oauth2_storage_mongo::CollectionConfig;
///
/// let config = CollectionConfig {
///     clients: "tenant_clients".to_string(),
///     ..CollectionConfig::default()
/// };
/// assert_eq!(config.users, "oauth_users");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionConfig {
    pub authorization_codes: String,
    pub access_tokens: String,
    pub refresh_tokens: String,
    pub clients: String,
    pub users: String,
    pub client_keys: String,
    pub jti: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            authorization_codes: "oauth_authorization_codes".to_string(),
            access_tokens: "oauth_access_tokens".to_string(),
            refresh_tokens: "oauth_refresh_tokens".to_string(),
            clients: "oauth_clients".to_string(),
            users: "oauth_users".to_string(),
            client_keys: "oauth_jwt".to_string(),
            jti: "oauth_jti".to_string(),
        }
    }
}
