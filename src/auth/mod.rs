//! Authentication: password hashing, session tokens and request extractors.

mod extractor;
pub mod password;
pub mod token;

use secrecy::{ExposeSecret, SecretString};

pub use extractor::{AdminSession, LoginRequired, PageSession};

use crate::db::{DbPool, admins, sessions};
use crate::error::AppResult;

/// Authenticated admin attached to a request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub admin_id: i32,
    pub username: String,
}

/// Session token taken from the cookie.
///
/// Wrapped in `SecretString` so it is never printed by `Debug`.
#[derive(Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    pub fn new(raw: String) -> Self {
        Self(SecretString::from(raw))
    }

    /// SHA-256 hash used for database lookups.
    pub fn hash(&self) -> String {
        token::hash_token(self.0.expose_secret())
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionToken([REDACTED])")
    }
}

/// Resolve a session token to its admin, ignoring expired sessions.
pub async fn resolve_session(pool: &DbPool, token: &SessionToken) -> AppResult<Option<AuthContext>> {
    let db = pool.connection();

    let Some(session) = sessions::find_valid_by_hash(db, &token.hash()).await? else {
        return Ok(None);
    };

    let admin = admins::find_by_id(db, session.admin_id).await?;

    Ok(admin.map(|a| AuthContext {
        admin_id: a.id,
        username: a.username,
    }))
}
