//! Database operations for the observation log.

use chrono::Utc;
use sea_orm::*;

use crate::entity::observation::{self, Entity as Observation};
use crate::error::AppResult;

/// Append an observation stamped with the current time.
pub async fn insert(db: &DatabaseConnection, text: &str) -> AppResult<observation::Model> {
    let model = observation::ActiveModel {
        id: NotSet,
        text: Set(text.to_string()),
        created_at: Set(Utc::now()),
    };

    Ok(model.insert(db).await?)
}

/// Full log, newest first.
pub async fn list_newest_first(db: &DatabaseConnection) -> AppResult<Vec<observation::Model>> {
    let results = Observation::find()
        .order_by_desc(observation::Column::CreatedAt)
        .order_by_desc(observation::Column::Id)
        .all(db)
        .await?;

    Ok(results)
}
