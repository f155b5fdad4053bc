//! Project API handlers.

use actix_web::{HttpResponse, get, post, web};
use tracing::info;

use crate::auth::AdminSession;
use crate::db::{DbPool, projects};
use crate::error::{AppError, AppResult};
use crate::models::{ProjectDetail, ProjectSummary, ProjectUpdate, SuccessResponse};

/// Configure project routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_project)
        .service(update_project)
        .service(list_projects);
}

/// Fetch one project.
#[utoipa::path(
    get,
    path = "/get-proyecto/{id}",
    tag = "Projects",
    params(
        ("id" = i32, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project fields", body = ProjectDetail),
        (status = 401, description = "No session"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("session_cookie" = [])
    )
)]
#[get("/get-proyecto/{id}")]
pub async fn get_project(
    _auth: AdminSession,
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let project = projects::find_by_id(pool.connection(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Proyecto".to_string()))?;

    Ok(HttpResponse::Ok().json(ProjectDetail::from(project)))
}

/// Update allow-listed project fields.
///
/// Keys outside the allow-list fail JSON parsing and never reach the database.
#[utoipa::path(
    post,
    path = "/actualizar-proyecto/{id}",
    tag = "Projects",
    params(
        ("id" = i32, Path, description = "Project ID")
    ),
    request_body = ProjectUpdate,
    responses(
        (status = 200, description = "Project updated", body = SuccessResponse),
        (status = 400, description = "Empty payload or unknown field"),
        (status = 401, description = "No session"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("session_cookie" = [])
    )
)]
#[post("/actualizar-proyecto/{id}")]
pub async fn update_project(
    auth: AdminSession,
    path: web::Path<i32>,
    body: web::Json<ProjectUpdate>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let changes = body.into_inner();
    changes.validate()?;

    projects::update(pool.connection(), id, changes)
        .await?
        .ok_or_else(|| AppError::NotFound("Proyecto".to_string()))?;

    info!(
        project_id = id,
        admin_id = auth.context.admin_id,
        admin = %auth.context.username,
        "Project updated"
    );

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

/// All projects ordered by id.
#[utoipa::path(
    get,
    path = "/api/proyectos",
    tag = "Projects",
    responses(
        (status = 200, description = "Project list", body = Vec<ProjectSummary>),
        (status = 401, description = "No session")
    ),
    security(
        ("session_cookie" = [])
    )
)]
#[get("/api/proyectos")]
pub async fn list_projects(
    _auth: AdminSession,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let items: Vec<ProjectSummary> = projects::list_all(pool.connection())
        .await?
        .into_iter()
        .map(ProjectSummary::from)
        .collect();

    Ok(HttpResponse::Ok().json(items))
}
