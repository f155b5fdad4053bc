//! Report generation and deletion.
//!
//! A report is a plain-text snapshot of a project written to the reports
//! directory plus one metadata row. File and row are kept in step:
//!
//! - generate: temp file, then row, then rename. A failed row write drops the
//!   temp file; a failed rename removes a freshly inserted row.
//! - delete: move the file aside, delete the row, then remove the moved file.
//!   A failed row delete puts the file back.

use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::db::{DbPool, projects, reports};
use crate::entity::{project, report};
use crate::error::{AppError, AppResult};
use crate::models::REPORT_KIND_TEXT;
use crate::services::storage::ReportStorage;

/// A report file ready to be sent to the client.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub report_id: i32,
    pub file_name: String,
    pub path: PathBuf,
}

/// Characters that cannot appear in a file name on common filesystems.
fn is_unsafe_file_char(c: char) -> bool {
    matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
}

/// `reporte_<project name>_<YYYYMMDD>.txt`, with unsafe characters replaced by `_`.
pub fn report_file_name(project_name: &str, date: NaiveDate) -> String {
    let safe: String = project_name
        .trim()
        .chars()
        .map(|c| if is_unsafe_file_char(c) { '_' } else { c })
        .collect();
    format!("reporte_{}_{}.txt", safe, date.format("%Y%m%d"))
}

/// File name used when the plain name already belongs to another project's
/// report of the same day: the project id is appended before the extension.
pub fn disambiguated_file_name(project_name: &str, date: NaiveDate, project_id: i32) -> String {
    let plain = report_file_name(project_name, date);
    let stem = plain.strip_suffix(".txt").unwrap_or(&plain);
    format!("{}_{}.txt", stem, project_id)
}

/// Pick the file name for a project's report and the row to reuse, if any.
///
/// A row is only reused when it belongs to the same project. Names that
/// collide with another project's report fall back to the id-suffixed name.
async fn resolve_file_name(
    db: &DatabaseConnection,
    project: &project::Model,
    date: NaiveDate,
) -> AppResult<(String, Option<report::Model>)> {
    let candidates = [
        report_file_name(&project.name, date),
        disambiguated_file_name(&project.name, date, project.id),
    ];

    for file_name in candidates {
        match reports::find_by_file_name(db, &file_name).await? {
            None => return Ok((file_name, None)),
            Some(existing) if existing.project_id == project.id => {
                return Ok((file_name, Some(existing)));
            }
            Some(existing) => {
                warn!(
                    file = %file_name,
                    owner_project_id = existing.project_id,
                    project_id = project.id,
                    "Report file name taken by another project"
                );
            }
        }
    }

    Err(AppError::Duplicate(format!(
        "Ya existe un reporte de otro proyecto con el nombre de '{}'",
        project.name
    )))
}

/// Four-line report body.
pub fn report_body(project: &project::Model, now: DateTime<Local>) -> String {
    format!(
        "Reporte del proyecto: {}\nEstado: {}\nAvance: {}\nFecha: {}\n",
        project.name,
        project.status,
        project.progress,
        now.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Write a report for a project and record it.
///
/// Regenerating on the same day overwrites the project's own file and
/// refreshes its row instead of adding a second one. Another project's
/// report is never overwritten.
pub async fn generate(
    pool: &DbPool,
    storage: &ReportStorage,
    project_id: i32,
) -> AppResult<GeneratedReport> {
    let db = pool.connection();

    let project = projects::find_by_id(db, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Proyecto".to_string()))?;

    let now = Local::now();
    let (file_name, existing) = resolve_file_name(db, &project, now.date_naive()).await?;
    let body = report_body(&project, now);

    let staged = storage.stage(&file_name, body.as_bytes()).await?;
    let file_path = staged.final_path().to_string_lossy().into_owned();
    let generated_at = now.with_timezone(&Utc);

    let registered = match existing {
        Some(existing) => reports::touch(db, existing, generated_at)
            .await
            .map(|row| (row, false)),
        None => reports::insert(
            db,
            project.id,
            &file_name,
            &file_path,
            REPORT_KIND_TEXT,
            generated_at,
        )
        .await
        .map(|row| (row, true)),
    };

    let (row, inserted) = match registered {
        Ok(r) => r,
        Err(e) => {
            storage.discard(staged).await;
            return Err(e);
        }
    };

    let path = match storage.commit(staged).await {
        Ok(path) => path,
        Err(e) => {
            if inserted && let Err(undo) = reports::delete_by_id(db, row.id).await {
                warn!(
                    "Report row {} left without a file after failed rename: {}",
                    row.id, undo
                );
            }
            return Err(e);
        }
    };

    info!(
        report_id = row.id,
        project_id = project.id,
        file = %file_name,
        "Report generated"
    );

    Ok(GeneratedReport {
        report_id: row.id,
        file_name,
        path,
    })
}

/// Delete a report row together with its file.
///
/// An unknown id is rejected before the filesystem is touched. A file that is
/// already gone is not an error.
pub async fn delete(pool: &DbPool, storage: &ReportStorage, report_id: i32) -> AppResult<()> {
    let db = pool.connection();

    let report = reports::find_by_id(db, report_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Reporte".to_string()))?;

    // Resolve by name inside the reports directory, never the stored path.
    let path = storage.path_for(&report.file_name);
    let trashed = storage.stash(&path).await?;
    if trashed.is_none() {
        warn!("Report file {} was already missing", path.display());
    }

    match reports::delete_by_id(db, report.id).await {
        Ok(_) => {
            if let Some(t) = trashed {
                storage.purge(t).await;
            }
            info!(report_id = report.id, file = %report.file_name, "Report deleted");
            Ok(())
        }
        Err(e) => {
            if let Some(t) = trashed {
                storage.restore(t).await;
            }
            Err(e)
        }
    }
}
