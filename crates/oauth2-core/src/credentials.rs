//! Credential hashing for client secrets and user passwords.
//!
//! Secrets are stored as Argon2id PHC strings over `identifier ‖ secret`,
//! each with its own random salt. Verification failures and unknown
//! identifiers are both reported as a plain `false` by the storage port,
//! so callers cannot distinguish the two.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

use crate::models::StorageError;

fn hash_credential(identifier: &str, secret: &str) -> Result<String, StorageError> {
    let salt = SaltString::generate(&mut OsRng);
    let material = format!("{identifier}{secret}");

    Argon2::default()
        .hash_password(material.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StorageError::server_error(&format!("credential hashing failed: {e}")))
}

/// Hash a client secret for storage in the client record.
pub fn hash_client_secret(client_id: &str, client_secret: &str) -> Result<String, StorageError> {
    hash_credential(client_id, client_secret)
}

/// Hash a user password for storage in the user record.
pub fn hash_user_password(username: &str, password: &str) -> Result<String, StorageError> {
    hash_credential(username, password)
}

/// Verify a presented secret against a stored PHC hash.
///
/// Returns `false` on mismatch and on an unparseable stored hash; neither
/// case is an error.
pub fn verify_credential(identifier: &str, secret: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    let material = format!("{identifier}{secret}");
    Argon2::default()
        .verify_password(material.as_bytes(), &parsed)
        .is_ok()
}
