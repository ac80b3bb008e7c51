use serde::{Deserialize, Serialize};

/// A registered client application, as written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub client_id: String,
    /// PHC-format hash of the client secret, produced by
    /// [`crate::credentials::hash_client_secret`]. `None` (or empty) marks
    /// a public client.
    pub client_secret: Option<String>,
    pub redirect_uris: Vec<String>,
    pub grant_types: Vec<String>,
    /// Space-separated scope string the client may request.
    pub scope: Option<String>,
    pub user_id: Option<String>,
}

impl Client {
    pub fn new(
        client_id: String,
        client_secret: Option<String>,
        redirect_uris: Vec<String>,
        grant_types: Vec<String>,
        scope: Option<String>,
        user_id: Option<String>,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uris,
            grant_types,
            scope,
            user_id,
        }
    }
}

/// The client record as read back by callers. The secret hash is never
/// part of this shape; credential checks go through the storage port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDetails {
    pub client_id: String,
    /// Registered redirect URIs, space-joined. Absent when none are
    /// registered.
    pub redirect_uri: Option<String>,
    pub grant_types: Vec<String>,
    pub scope: Option<String>,
    pub user_id: Option<String>,
}
