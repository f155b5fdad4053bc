//! Academic catalog API handlers: careers, groups and students.

use actix_web::{HttpResponse, delete, get, post, web};
use tracing::info;

use crate::auth::AdminSession;
use crate::db::{DbPool, catalog};
use crate::error::{AppError, AppResult};
use crate::models::{CareerItem, CreateStudentRequest, GroupItem, StudentItem, SuccessResponse};

/// Configure catalog routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_careers)
        .service(list_groups)
        .service(list_students)
        .service(create_student)
        .service(delete_student);
}

#[utoipa::path(
    get,
    path = "/api/carreras",
    tag = "Catalog",
    responses(
        (status = 200, description = "Careers ordered by id", body = Vec<CareerItem>),
        (status = 401, description = "No session")
    ),
    security(
        ("session_cookie" = [])
    )
)]
#[get("/api/carreras")]
pub async fn list_careers(
    _auth: AdminSession,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let items: Vec<CareerItem> = catalog::list_careers(pool.connection())
        .await?
        .into_iter()
        .map(CareerItem::from)
        .collect();

    Ok(HttpResponse::Ok().json(items))
}

#[utoipa::path(
    get,
    path = "/api/grupos/{carrera_id}",
    tag = "Catalog",
    params(
        ("carrera_id" = i32, Path, description = "Career ID")
    ),
    responses(
        (status = 200, description = "Groups of the career", body = Vec<GroupItem>),
        (status = 401, description = "No session"),
        (status = 404, description = "Career not found")
    ),
    security(
        ("session_cookie" = [])
    )
)]
#[get("/api/grupos/{carrera_id}")]
pub async fn list_groups(
    _auth: AdminSession,
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let career_id = path.into_inner();
    let db = pool.connection();

    if catalog::find_career(db, career_id).await?.is_none() {
        return Err(AppError::NotFound("Carrera".to_string()));
    }

    let items: Vec<GroupItem> = catalog::list_groups_by_career(db, career_id)
        .await?
        .into_iter()
        .map(GroupItem::from)
        .collect();

    Ok(HttpResponse::Ok().json(items))
}

#[utoipa::path(
    get,
    path = "/api/alumnos/{grupo_id}",
    tag = "Catalog",
    params(
        ("grupo_id" = i32, Path, description = "Group ID")
    ),
    responses(
        (status = 200, description = "Students ordered by last name, first name", body = Vec<StudentItem>),
        (status = 401, description = "No session"),
        (status = 404, description = "Group not found")
    ),
    security(
        ("session_cookie" = [])
    )
)]
#[get("/api/alumnos/{grupo_id}")]
pub async fn list_students(
    _auth: AdminSession,
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let group_id = path.into_inner();
    let db = pool.connection();

    if catalog::find_group(db, group_id).await?.is_none() {
        return Err(AppError::NotFound("Grupo".to_string()));
    }

    let items: Vec<StudentItem> = catalog::list_students_by_group(db, group_id)
        .await?
        .into_iter()
        .map(StudentItem::from)
        .collect();

    Ok(HttpResponse::Ok().json(items))
}

/// Register a student in a group.
#[utoipa::path(
    post,
    path = "/api/alumnos",
    tag = "Catalog",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentItem),
        (status = 400, description = "Missing field"),
        (status = 401, description = "No session"),
        (status = 404, description = "Group not found"),
        (status = 409, description = "Enrollment id already registered")
    ),
    security(
        ("session_cookie" = [])
    )
)]
#[post("/api/alumnos")]
pub async fn create_student(
    _auth: AdminSession,
    body: web::Json<CreateStudentRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let new = body.validate()?;
    let db = pool.connection();

    if catalog::find_group(db, new.group_id).await?.is_none() {
        return Err(AppError::NotFound("Grupo".to_string()));
    }

    let student = catalog::insert_student(db, &new).await?;
    info!(
        student_id = student.id,
        group_id = student.group_id,
        "Student created"
    );

    Ok(HttpResponse::Created().json(StudentItem::from(student)))
}

#[utoipa::path(
    delete,
    path = "/api/alumnos/{id}",
    tag = "Catalog",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student deleted", body = SuccessResponse),
        (status = 401, description = "No session"),
        (status = 404, description = "Student not found")
    ),
    security(
        ("session_cookie" = [])
    )
)]
#[delete("/api/alumnos/{id}")]
pub async fn delete_student(
    _auth: AdminSession,
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    if !catalog::delete_student(pool.connection(), id).await? {
        return Err(AppError::NotFound("Alumno".to_string()));
    }

    info!(student_id = id, "Student deleted");
    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}
