//! Database operations for server-side admin sessions.

use chrono::Utc;
use sea_orm::*;

use crate::entity::admin_session::{self, Entity as AdminSession};
use crate::error::{AppError, AppResult};

/// Insert a new session (stores the token hash, not the raw token).
pub async fn insert(
    db: &DatabaseConnection,
    admin_id: i32,
    token_hash: &str,
    ttl_secs: u64,
) -> AppResult<admin_session::Model> {
    let now = Utc::now();
    let expires_at = i64::try_from(ttl_secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            AppError::InvalidInput(format!("Session lifetime out of range: {}s", ttl_secs))
        })?;

    let model = admin_session::ActiveModel {
        id: NotSet,
        admin_id: Set(admin_id),
        token_hash: Set(token_hash.to_string()),
        expires_at: Set(expires_at),
        created_at: Set(now),
    };

    Ok(model.insert(db).await?)
}

/// Find a non-expired session by its token hash.
pub async fn find_valid_by_hash(
    db: &DatabaseConnection,
    token_hash: &str,
) -> AppResult<Option<admin_session::Model>> {
    let result = AdminSession::find()
        .filter(admin_session::Column::TokenHash.eq(token_hash))
        .filter(admin_session::Column::ExpiresAt.gt(Utc::now()))
        .one(db)
        .await?;

    Ok(result)
}

/// Delete a session by its token hash. Returns true if a row was removed.
pub async fn delete_by_hash(db: &DatabaseConnection, token_hash: &str) -> AppResult<bool> {
    let result = AdminSession::delete_many()
        .filter(admin_session::Column::TokenHash.eq(token_hash))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

/// Remove every expired session.
pub async fn purge_expired(db: &DatabaseConnection) -> AppResult<u64> {
    let result = AdminSession::delete_many()
        .filter(admin_session::Column::ExpiresAt.lte(Utc::now()))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
