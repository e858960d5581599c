use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::User;

type HmacSha256 = Hmac<Sha256>;

/// Hash a password with the server secret as HMAC key.
///
/// The secret lives in the environment, not the database, so a database
/// breach alone cannot be brute-forced offline.
pub fn hash_password(password: &str, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(password.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Check a candidate password against a stored hash
pub fn verify_password(password: &str, secret: &str, stored_hash: &str) -> bool {
    hash_password(password, secret) == stored_hash
}

/// Derive a fresh opaque bearer token for a user.
///
/// Keyed on the server secret plus a nanosecond timestamp, so two logins
/// never yield the same token.
fn generate_token(user_id: i64, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(format!("{}:{}", user_id, Utc::now().timestamp_nanos_opt().unwrap_or_default()).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Tokens are stored hashed; a database breach does not leak usable tokens.
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Issue a new bearer token for the user and persist its hash
pub async fn issue_token(pool: &SqlitePool, user_id: i64, secret: &str) -> Result<String> {
    let token = generate_token(user_id, secret);
    let token_hash = hash_token(&token);

    sqlx::query("INSERT INTO auth_tokens (user_id, token_hash, created_at) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(&token_hash)
        .bind(Utc::now())
        .execute(pool)
        .await?;

    Ok(token)
}

/// Revoke the presented token; unknown tokens are a silent no-op
pub async fn revoke_token(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM auth_tokens WHERE token_hash = ?")
        .bind(hash_token(token))
        .execute(pool)
        .await?;

    Ok(())
}

/// Resolve a bearer token to its user, if the token is known
pub async fn user_for_token(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT u.* FROM users u \
         JOIN auth_tokens t ON t.user_id = u.id \
         WHERE t.token_hash = ?",
    )
    .bind(hash_token(token))
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("hunter2", "secret");
        assert!(verify_password("hunter2", "secret", &hash));
        assert!(!verify_password("hunter3", "secret", &hash));
        assert!(!verify_password("hunter2", "other-secret", &hash));
    }

    #[test]
    fn test_tokens_are_unique_per_issue() {
        let a = generate_token(1, "secret");
        let b = generate_token(1, "secret");
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_token_hash_is_stable() {
        assert_eq!(hash_token("abc"), hash_token("abc"));
        assert_ne!(hash_token("abc"), hash_token("abd"));
    }
}
