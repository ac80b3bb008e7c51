use std::time::{SystemTime, UNIX_EPOCH};

use oauth2_mongo_storage::{
    credentials, AccessToken, AuthorizationCode, Client, ClientKey, Jti, RefreshToken, User,
};
use oauth2_ports::Storage;

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before epoch")
        .as_secs() as i64
}

fn io_err(e: impl ToString) -> std::io::Error {
    std::io::Error::other(e.to_string())
}

/// A contract test suite that every `Storage` backend must satisfy.
///
/// Covers the lookup sentinels, the field-shape round-trips, credential
/// verification, and single-use deletion semantics.
pub async fn run_storage_contract(storage: &dyn Storage) -> Result<(), Box<dyn std::error::Error>> {
    let expires = now_secs() + 3600;

    // Absent keys: every lookup family reports absence, never an error.
    assert!(storage
        .get_authorization_code("missing")
        .await
        .map_err(io_err)?
        .is_none());
    assert!(storage
        .get_access_token("missing")
        .await
        .map_err(io_err)?
        .is_none());
    assert!(storage
        .get_refresh_token("missing")
        .await
        .map_err(io_err)?
        .is_none());
    assert!(storage
        .get_jti("nobody", "sub", "aud", expires, "nonce")
        .await
        .map_err(io_err)?
        .is_none());
    assert!(storage
        .get_client_details("missing")
        .await
        .map_err(io_err)?
        .is_none());
    assert!(storage
        .get_user_details("missing")
        .await
        .map_err(io_err)?
        .is_none());
    assert!(storage
        .get_client_key("missing", "sub")
        .await
        .map_err(io_err)?
        .is_none());
    assert_eq!(storage.get_client_scope("missing").await.map_err(io_err)?, "");
    assert!(!storage
        .check_client_credentials("missing", "secret")
        .await
        .map_err(io_err)?);
    assert!(!storage
        .check_user_credentials("missing", "password")
        .await
        .map_err(io_err)?);
    assert!(!storage.is_public_client("missing").await.map_err(io_err)?);
    assert!(!storage
        .check_restricted_grant_type("missing", "authorization_code")
        .await
        .map_err(io_err)?);

    // Confidential client with a hashed secret.
    let secret_hash = credentials::hash_client_secret("librarian", "secret").map_err(io_err)?;
    let client = Client::new(
        "librarian".to_string(),
        Some(secret_hash),
        vec!["/receive-code".to_string()],
        vec!["authorization_code".to_string()],
        Some("read write".to_string()),
        None,
    );

    storage.set_client_details(&client).await.map_err(io_err)?;

    // Wrong secret and unknown client must look identical to the caller.
    assert!(storage
        .check_client_credentials("librarian", "secret")
        .await
        .map_err(io_err)?);
    assert!(!storage
        .check_client_credentials("librarian", "wrong")
        .await
        .map_err(io_err)?);
    assert!(!storage
        .is_public_client("librarian")
        .await
        .map_err(io_err)?);

    let details = storage
        .get_client_details("librarian")
        .await
        .map_err(io_err)?
        .ok_or_else(|| io_err("client should exist"))?;
    assert_eq!(details.client_id, "librarian");
    assert_eq!(details.redirect_uri, Some("/receive-code".to_string()));
    assert_eq!(details.grant_types, vec!["authorization_code"]);
    assert_eq!(details.scope, Some("read write".to_string()));

    assert_eq!(
        storage.get_client_scope("librarian").await.map_err(io_err)?,
        "read write"
    );
    assert!(storage
        .check_restricted_grant_type("librarian", "authorization_code")
        .await
        .map_err(io_err)?);
    assert!(!storage
        .check_restricted_grant_type("librarian", "client_credentials")
        .await
        .map_err(io_err)?);

    // Uniqueness parity: saving the same client_id twice should fail.
    let dup = storage.set_client_details(&client).await;
    assert!(dup.is_err(), "saving the same client_id twice should fail");

    // Public client: no secret, no credential match.
    let public = Client::new(
        "kiosk".to_string(),
        None,
        vec!["/kiosk".to_string()],
        vec!["implicit".to_string()],
        None,
        None,
    );
    storage.set_client_details(&public).await.map_err(io_err)?;
    assert!(storage.is_public_client("kiosk").await.map_err(io_err)?);
    assert!(!storage
        .check_client_credentials("kiosk", "")
        .await
        .map_err(io_err)?);
    assert_eq!(storage.get_client_scope("kiosk").await.map_err(io_err)?, "");

    // User roundtrip + credentials.
    let password_hash = credentials::hash_user_password("alice", "wonderland").map_err(io_err)?;
    let user = User::new(
        "alice".to_string(),
        password_hash,
        Some("read".to_string()),
    );
    storage.set_user(&user).await.map_err(io_err)?;

    let user_details = storage
        .get_user_details("alice")
        .await
        .map_err(io_err)?
        .ok_or_else(|| io_err("user should exist"))?;
    assert_eq!(user_details.user_id, "alice");
    assert_eq!(user_details.scope, Some("read".to_string()));

    assert!(storage
        .check_user_credentials("alice", "wonderland")
        .await
        .map_err(io_err)?);
    assert!(!storage
        .check_user_credentials("alice", "looking-glass")
        .await
        .map_err(io_err)?);

    // Authorization code roundtrip, then single-use expiry.
    let code = AuthorizationCode::new(
        "code_1".to_string(),
        "librarian".to_string(),
        "alice".to_string(),
        "/receive-code".to_string(),
        expires,
        Some("read".to_string()),
    );
    storage.set_authorization_code(&code).await.map_err(io_err)?;

    let fetched_code = storage
        .get_authorization_code("code_1")
        .await
        .map_err(io_err)?
        .ok_or_else(|| io_err("auth code should exist"))?;
    assert_eq!(fetched_code, code);

    storage
        .expire_authorization_code("code_1")
        .await
        .map_err(io_err)?;
    assert!(storage
        .get_authorization_code("code_1")
        .await
        .map_err(io_err)?
        .is_none());
    // Expiring an already-consumed code is a no-op.
    storage
        .expire_authorization_code("code_1")
        .await
        .map_err(io_err)?;

    // Access token roundtrip; tokens are never deleted by the backend.
    let token = AccessToken::new(
        "access_token_1".to_string(),
        "librarian".to_string(),
        Some("alice".to_string()),
        expires,
        None,
    );
    storage.set_access_token(&token).await.map_err(io_err)?;

    let fetched_token = storage
        .get_access_token("access_token_1")
        .await
        .map_err(io_err)?
        .ok_or_else(|| io_err("token should exist"))?;
    assert_eq!(fetched_token, token);

    // Refresh token roundtrip, then rotation.
    let refresh = RefreshToken::new(
        "tok1".to_string(),
        "cid".to_string(),
        "uid".to_string(),
        expires,
        Some("read write".to_string()),
    );
    storage.set_refresh_token(&refresh).await.map_err(io_err)?;

    let fetched_refresh = storage
        .get_refresh_token("tok1")
        .await
        .map_err(io_err)?
        .ok_or_else(|| io_err("refresh token should exist"))?;
    assert_eq!(fetched_refresh, refresh);

    storage.unset_refresh_token("tok1").await.map_err(io_err)?;
    assert!(storage
        .get_refresh_token("tok1")
        .await
        .map_err(io_err)?
        .is_none());
    storage.unset_refresh_token("tok1").await.map_err(io_err)?;

    // JWT-bearer public key, keyed by (client_id, subject).
    let key = ClientKey::new(
        "librarian".to_string(),
        "service@example.test".to_string(),
        "-----BEGIN PUBLIC KEY-----stub-----END PUBLIC KEY-----".to_string(),
    );
    storage.set_client_key(&key).await.map_err(io_err)?;

    assert_eq!(
        storage
            .get_client_key("librarian", "service@example.test")
            .await
            .map_err(io_err)?,
        Some(key.public_key.clone())
    );
    assert!(storage
        .get_client_key("librarian", "someone-else")
        .await
        .map_err(io_err)?
        .is_none());

    // JTI replay record: existence of the exact tuple marks a replay.
    let jti = Jti::new(
        "librarian".to_string(),
        "service@example.test".to_string(),
        "https://issuer.example/token".to_string(),
        expires,
        "nonce-1".to_string(),
    );
    storage.set_jti(&jti).await.map_err(io_err)?;

    let fetched_jti = storage
        .get_jti(
            "librarian",
            "service@example.test",
            "https://issuer.example/token",
            expires,
            "nonce-1",
        )
        .await
        .map_err(io_err)?
        .ok_or_else(|| io_err("jti record should exist"))?;
    assert_eq!(fetched_jti, jti);

    assert!(storage
        .get_jti(
            "librarian",
            "service@example.test",
            "https://issuer.example/token",
            expires,
            "nonce-2",
        )
        .await
        .map_err(io_err)?
        .is_none());

    Ok(())
}
