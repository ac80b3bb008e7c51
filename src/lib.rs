//! MongoDB persistence for OAuth2 servers.
//!
//! This facade crate re-exports the storage port, the MongoDB backend, and
//! the domain records so consumers depend on a single crate. Construct a
//! ready-to-use backend with [`storage::create_storage`], or build a
//! [`storage::MongoStorage`] directly for an uninstrumented handle.

pub mod storage;

pub use oauth2_core::{
    credentials, AccessToken, AuthorizationCode, Client, ClientDetails, ClientKey, Jti,
    RefreshToken, StorageError, User, UserDetails,
};
