//! Server-rendered pages behind the admin session.

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use chrono::Local;
use serde_json::json;

use crate::auth::PageSession;
use crate::db::{DbPool, catalog, observations, projects, reports};
use crate::error::AppResult;
use crate::models::{
    CareerItem, GroupItem, ObservationForm, ObservationItem, ProjectSummary, RosterQuery,
};
use crate::services::attendance;
use crate::views::Views;
use crate::views::flash::{Flash, FlashLevel};

/// Configure page routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard)
        .service(attendance_page)
        .service(projects_page)
        .service(reports_page)
        .service(observations_page)
        .service(add_observation)
        .service(attendance_roster);
}

#[get("/dashboard")]
pub async fn dashboard(
    req: HttpRequest,
    session: PageSession,
    views: web::Data<Views>,
) -> AppResult<HttpResponse> {
    views.page(
        &req,
        "dashboard",
        json!({ "username": session.context.username }),
    )
}

/// Career and group picker for taking attendance.
#[get("/asistencia")]
pub async fn attendance_page(
    req: HttpRequest,
    _session: PageSession,
    pool: web::Data<DbPool>,
    views: web::Data<Views>,
) -> AppResult<HttpResponse> {
    let db = pool.connection();

    let mut carreras = Vec::new();
    for career in catalog::list_careers(db).await? {
        let grupos: Vec<GroupItem> = catalog::list_groups_by_career(db, career.id)
            .await?
            .into_iter()
            .map(GroupItem::from)
            .collect();
        let mut entry = json!(CareerItem::from(career));
        entry["grupos"] = json!(grupos);
        carreras.push(entry);
    }

    views.page(
        &req,
        "asistencia",
        json!({
            "carreras": carreras,
            "hoy": Local::now().date_naive().format("%Y-%m-%d").to_string(),
        }),
    )
}

#[get("/proyectos")]
pub async fn projects_page(
    req: HttpRequest,
    _session: PageSession,
    pool: web::Data<DbPool>,
    views: web::Data<Views>,
) -> AppResult<HttpResponse> {
    let proyectos: Vec<ProjectSummary> = projects::list_all(pool.connection())
        .await?
        .into_iter()
        .map(ProjectSummary::from)
        .collect();

    views.page(&req, "proyectos", json!({ "proyectos": proyectos }))
}

#[get("/reportes")]
pub async fn reports_page(
    req: HttpRequest,
    _session: PageSession,
    pool: web::Data<DbPool>,
    views: web::Data<Views>,
) -> AppResult<HttpResponse> {
    let reportes = reports::list_with_projects(pool.connection()).await?;
    views.page(&req, "reportes", json!({ "reportes": reportes }))
}

#[get("/observaciones")]
pub async fn observations_page(
    req: HttpRequest,
    _session: PageSession,
    pool: web::Data<DbPool>,
    views: web::Data<Views>,
) -> AppResult<HttpResponse> {
    let items: Vec<ObservationItem> = observations::list_newest_first(pool.connection())
        .await?
        .into_iter()
        .map(ObservationItem::from)
        .collect();

    views.page(&req, "observaciones", json!({ "observaciones": items }))
}

/// Append an observation. Blank text is ignored.
#[post("/observaciones")]
pub async fn add_observation(
    _session: PageSession,
    form: web::Form<ObservationForm>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let text = form.text.trim();

    let mut response = HttpResponse::Found();
    response.append_header(("Location", "/observaciones"));

    if !text.is_empty() {
        observations::insert(pool.connection(), text).await?;
        response.cookie(
            Flash::new(FlashLevel::Success, "Observación guardada correctamente.").to_cookie(),
        );
    }

    Ok(response.finish())
}

/// Roster of a group for a date; every student starts absent.
#[get("/lista-asistencia")]
pub async fn attendance_roster(
    req: HttpRequest,
    _session: PageSession,
    query: web::Query<RosterQuery>,
    pool: web::Data<DbPool>,
    views: web::Data<Views>,
) -> AppResult<HttpResponse> {
    let date = attendance::parse_date(&query.fecha)?;
    let roster = attendance::build_roster(pool.get_ref(), query.grupo_id, date).await?;

    views.page(&req, "lista_asistencia", json!(roster))
}
