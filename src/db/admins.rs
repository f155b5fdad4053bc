//! Database operations for administrator accounts.

use chrono::Utc;
use sea_orm::*;

use crate::entity::admin::{self, Entity as Admin};
use crate::error::AppResult;

/// Find an admin by its (already normalized) username.
pub async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> AppResult<Option<admin::Model>> {
    let result = Admin::find()
        .filter(admin::Column::Username.eq(username))
        .one(db)
        .await?;

    Ok(result)
}

/// Find an admin by ID.
pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<Option<admin::Model>> {
    Ok(Admin::find_by_id(id).one(db).await?)
}

/// Insert the admin unless the username already exists.
///
/// Returns true when a row was created. An existing account keeps its
/// password; changing it is not supported through this path.
pub async fn insert_if_absent(
    db: &DatabaseConnection,
    username: &str,
    password_hash: &str,
) -> AppResult<bool> {
    if find_by_username(db, username).await?.is_some() {
        return Ok(false);
    }

    let model = admin::ActiveModel {
        id: NotSet,
        username: Set(username.to_string()),
        password_hash: Set(password_hash.to_string()),
        created_at: Set(Utc::now()),
    };
    model.insert(db).await?;

    Ok(true)
}
