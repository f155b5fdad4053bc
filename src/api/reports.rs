//! Report API handlers: generate (download), delete and list.

use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, delete, get, web};

use crate::auth::AdminSession;
use crate::db::{DbPool, reports as report_rows};
use crate::error::AppResult;
use crate::models::{ReportListItem, SuccessResponse};
use crate::services::ReportStorage;
use crate::services::reports;

/// Configure report routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_report)
        .service(delete_report)
        .service(list_reports);
}

/// Generate a project report and download it as an attachment.
#[utoipa::path(
    get,
    path = "/generar-reporte/{id}",
    tag = "Reports",
    params(
        ("id" = i32, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Plain-text report attachment", content_type = "text/plain"),
        (status = 401, description = "No session"),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Report could not be written")
    ),
    security(
        ("session_cookie" = [])
    )
)]
#[get("/generar-reporte/{id}")]
pub async fn generate_report(
    _auth: AdminSession,
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
    storage: web::Data<ReportStorage>,
) -> AppResult<NamedFile> {
    let project_id = path.into_inner();
    let report = reports::generate(pool.get_ref(), storage.get_ref(), project_id).await?;

    let file = NamedFile::open_async(&report.path)
        .await?
        .set_content_disposition(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(report.file_name)],
        });

    Ok(file)
}

/// Delete a report and its file.
#[utoipa::path(
    delete,
    path = "/eliminar-reporte/{id}",
    tag = "Reports",
    params(
        ("id" = i32, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report deleted", body = SuccessResponse),
        (status = 401, description = "No session"),
        (status = 404, description = "Report not found")
    ),
    security(
        ("session_cookie" = [])
    )
)]
#[delete("/eliminar-reporte/{id}")]
pub async fn delete_report(
    _auth: AdminSession,
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
    storage: web::Data<ReportStorage>,
) -> AppResult<HttpResponse> {
    reports::delete(pool.get_ref(), storage.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

/// Generated reports with their project name, newest first.
#[utoipa::path(
    get,
    path = "/api/reportes",
    tag = "Reports",
    responses(
        (status = 200, description = "Report list", body = Vec<ReportListItem>),
        (status = 401, description = "No session")
    ),
    security(
        ("session_cookie" = [])
    )
)]
#[get("/api/reportes")]
pub async fn list_reports(
    _auth: AdminSession,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let items = report_rows::list_with_projects(pool.connection()).await?;
    Ok(HttpResponse::Ok().json(items))
}
