//! Database operations for greenhouse projects.

use chrono::Utc;
use sea_orm::*;

use crate::entity::project::{self, Entity as Project};
use crate::error::AppResult;
use crate::models::ProjectUpdate;

/// List every project ordered by id.
pub async fn list_all(db: &DatabaseConnection) -> AppResult<Vec<project::Model>> {
    let results = Project::find()
        .order_by_asc(project::Column::Id)
        .all(db)
        .await?;

    Ok(results)
}

/// Get a project by ID.
pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<Option<project::Model>> {
    Ok(Project::find_by_id(id).one(db).await?)
}

/// Apply an allow-listed update. Only supplied fields are written.
///
/// Returns `None` when the project does not exist.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    changes: ProjectUpdate,
) -> AppResult<Option<project::Model>> {
    let Some(existing) = find_by_id(db, id).await? else {
        return Ok(None);
    };

    let mut active: project::ActiveModel = existing.into();
    if let Some(name) = changes.name {
        active.name = Set(name);
    }
    if let Some(description) = changes.description {
        active.description = Set(description);
    }
    if let Some(status) = changes.status {
        active.status = Set(status);
    }
    if let Some(owner) = changes.owner {
        active.owner = Set(owner);
    }
    if let Some(start_date) = changes.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(progress) = changes.progress {
        active.progress = Set(progress);
    }
    if let Some(investment) = changes.investment {
        active.investment = Set(investment);
    }
    if let Some(resources) = changes.resources {
        active.resources = Set(resources);
    }
    active.updated_at = Set(Utc::now());

    Ok(Some(active.update(db).await?))
}
