//! Database operations for report metadata.

use chrono::{DateTime, Utc};
use sea_orm::*;

use crate::entity::project::Entity as Project;
use crate::entity::report::{self, ActiveModel, Entity as Report};
use crate::error::{AppError, AppResult};
use crate::models::ReportListItem;

/// All reports joined with their project name, newest first.
pub async fn list_with_projects(db: &DatabaseConnection) -> AppResult<Vec<ReportListItem>> {
    let rows = Report::find()
        .find_also_related(Project)
        .order_by_desc(report::Column::GeneratedAt)
        .order_by_desc(report::Column::Id)
        .all(db)
        .await?;

    // Reports whose project vanished are hidden, matching an inner join.
    let items = rows
        .into_iter()
        .filter_map(|(r, p)| {
            p.map(|p| ReportListItem {
                id: r.id,
                project_id: r.project_id,
                project_name: p.name,
                file_name: r.file_name,
                generated_at: r.generated_at,
                kind: r.kind,
            })
        })
        .collect();

    Ok(items)
}

/// Get a report by ID.
pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<Option<report::Model>> {
    Ok(Report::find_by_id(id).one(db).await?)
}

/// Get a report by its file name.
pub async fn find_by_file_name(
    db: &DatabaseConnection,
    file_name: &str,
) -> AppResult<Option<report::Model>> {
    let result = Report::find()
        .filter(report::Column::FileName.eq(file_name))
        .one(db)
        .await?;

    Ok(result)
}

/// Insert a new report row.
pub async fn insert(
    db: &DatabaseConnection,
    project_id: i32,
    file_name: &str,
    file_path: &str,
    kind: &str,
    generated_at: DateTime<Utc>,
) -> AppResult<report::Model> {
    let model = ActiveModel {
        id: NotSet,
        project_id: Set(project_id),
        file_name: Set(file_name.to_string()),
        file_path: Set(file_path.to_string()),
        generated_at: Set(generated_at),
        kind: Set(kind.to_string()),
    };

    model
        .insert(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert report: {}", e)))
}

/// Refresh the generation time of an existing row.
pub async fn touch(
    db: &DatabaseConnection,
    existing: report::Model,
    generated_at: DateTime<Utc>,
) -> AppResult<report::Model> {
    let mut active: ActiveModel = existing.into();
    active.generated_at = Set(generated_at);

    active
        .update(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to update report: {}", e)))
}

/// Delete a report row. Returns true if a row was removed.
pub async fn delete_by_id(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
    let result = Report::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
