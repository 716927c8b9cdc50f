//! Token revocation set backed by Redis.
//!
//! Revoked tokens are stored under a SHA-256 fingerprint of the raw token
//! with a TTL equal to the token's remaining lifetime, so the set stays
//! bounded and survives process restarts. Once the token would have expired
//! anyway, the entry lapses on its own.

use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use sha2::{Digest, Sha256};

use crate::errors::AppError;

/// Key prefix for revoked-token entries.
const KEY_PREFIX: &str = "revoked_token";

/// Hex-encoded SHA-256 of the raw token; raw tokens never reach Redis.
fn fingerprint(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

fn key_for(token: &str) -> String {
    format!("{KEY_PREFIX}:{}", fingerprint(token))
}

/// Add a token to the revocation set. Idempotent; re-revoking refreshes the
/// TTL, which can only shorten the entry's life relative to the token expiry.
pub async fn revoke(
    redis: &ConnectionManager,
    token: &str,
    ttl_secs: i64,
) -> Result<(), AppError> {
    let mut conn = redis.clone();
    // Hold revoked entries for at least one second so a token expiring
    // this instant still registers as revoked.
    let ttl = ttl_secs.max(1) as u64;
    let _: () = conn.set_ex(key_for(token), 1u8, ttl).await?;
    tracing::debug!(ttl, "Token revoked");
    Ok(())
}

/// Check whether a token has been revoked.
pub async fn is_revoked(redis: &ConnectionManager, token: &str) -> Result<bool, AppError> {
    let mut conn = redis.clone();
    let exists: bool = conn.exists(key_for(token)).await?;
    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_deterministic_hex() {
        let a = fingerprint("some.jwt.token");
        let b = fingerprint("some.jwt.token");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn fingerprint_differs_per_token() {
        assert_ne!(fingerprint("token-a"), fingerprint("token-b"));
    }

    #[test]
    fn key_is_prefixed_and_raw_token_free() {
        let key = key_for("secret.raw.token");
        assert!(key.starts_with("revoked_token:"));
        assert!(!key.contains("secret.raw.token"));
    }
}
