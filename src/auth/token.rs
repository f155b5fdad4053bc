//! Opaque session tokens.

use sha2::{Digest, Sha256};

/// Prefix that makes leaked tokens recognisable.
const TOKEN_PREFIX: &str = "inv_s_";

/// Generate a random session token string.
pub fn generate_token() -> String {
    let random_bytes: [u8; 32] = rand::random();
    format!("{}{}", TOKEN_PREFIX, hex::encode(random_bytes))
}

/// Hash a session token using SHA-256. Only the hash is persisted.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
