//! Attendance API handlers.
//!
//! Saving is a stub: the payload is logged and acknowledged but never stored.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use futures_util::StreamExt;
use tracing::warn;

use crate::auth::AdminSession;
use crate::db::{DbPool, attendance as attendance_rows, catalog};
use crate::error::{AppError, AppResult};
use crate::models::{AttendanceHistoryItem, HistoryQuery, SaveAttendanceResponse};
use crate::services::attendance;
use crate::views::Views;

/// Largest payload prefix, in bytes, echoed into the log.
const MAX_LOGGED_PAYLOAD: usize = 2048;

/// Configure attendance routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(save_attendance)
        .service(attendance_history)
        .service(attendance_pdf);
}

/// Accept an attendance payload of any shape without persisting it.
#[utoipa::path(
    post,
    path = "/api/guardar-asistencia",
    tag = "Attendance",
    request_body(content = String, description = "Any payload of any size; its head is logged, nothing is stored"),
    responses(
        (status = 200, description = "Acknowledged, persisted is always false", body = SaveAttendanceResponse),
        (status = 401, description = "No session")
    ),
    security(
        ("session_cookie" = [])
    )
)]
#[post("/api/guardar-asistencia")]
pub async fn save_attendance(
    _auth: AdminSession,
    mut body: web::Payload,
) -> Result<HttpResponse, actix_web::Error> {
    // Streamed so that no body size is refused; only the head is kept for the log.
    let mut head = Vec::new();
    let mut total = 0usize;
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        total += chunk.len();
        let room = MAX_LOGGED_PAYLOAD.saturating_sub(head.len());
        head.extend_from_slice(&chunk[..chunk.len().min(room)]);
    }

    warn!(
        bytes = total,
        payload = %String::from_utf8_lossy(&head),
        "Attendance received but not persisted"
    );

    Ok(HttpResponse::Ok().json(SaveAttendanceResponse {
        success: true,
        message: "Asistencia guardada correctamente".to_string(),
        persisted: false,
    }))
}

/// Stored attendance sessions of a group, newest first.
#[utoipa::path(
    get,
    path = "/api/historial-asistencia",
    tag = "Attendance",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Attendance history", body = Vec<AttendanceHistoryItem>),
        (status = 401, description = "No session"),
        (status = 404, description = "Group not found")
    ),
    security(
        ("session_cookie" = [])
    )
)]
#[get("/api/historial-asistencia")]
pub async fn attendance_history(
    _auth: AdminSession,
    query: web::Query<HistoryQuery>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let db = pool.connection();

    if catalog::find_group(db, query.grupo_id).await?.is_none() {
        return Err(AppError::NotFound("Grupo".to_string()));
    }

    let items = attendance_rows::history_for_group(db, query.grupo_id).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// Printable attendance sheet. The body is HTML served under a PDF content type.
#[utoipa::path(
    get,
    path = "/generar-pdf-asistencia/{id}",
    tag = "Attendance",
    params(
        ("id" = i32, Path, description = "Attendance session ID")
    ),
    responses(
        (status = 200, description = "Attendance sheet attachment", content_type = "application/pdf"),
        (status = 401, description = "No session"),
        (status = 404, description = "Attendance session not found")
    ),
    security(
        ("session_cookie" = [])
    )
)]
#[get("/generar-pdf-asistencia/{id}")]
pub async fn attendance_pdf(
    _auth: AdminSession,
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
    views: web::Data<Views>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let sheet = attendance::build_sheet(pool.get_ref(), id).await?;
    let html = views.render("pdf_asistencia", &serde_json::to_value(&sheet)?)?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/pdf"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=asistencia_{}.pdf", id),
        ))
        .body(html))
}
