//! Shared test helpers.

use std::path::PathBuf;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use secrecy::SecretString;
use serde_json::Value;
use tempfile::TempDir;

use invernadero_lib::config::{
    AdminSeed, Config, DatabaseSettings, Environment, SESSION_COOKIE,
};
use invernadero_lib::db::DbPool;
use invernadero_lib::entity::student;
use invernadero_lib::middleware::RequestLogger;
use invernadero_lib::services::{ReportStorage, seed_admin};
use invernadero_lib::views::Views;

/// Seeded admin credentials. The username is stored upper-cased.
pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "test-password-123";

/// Database, reports directory and configuration of one test.
pub struct TestEnv {
    // Keeps the directory alive for the duration of the test.
    _dir: TempDir,
    pub pool: DbPool,
    pub storage: ReportStorage,
    pub config: Config,
}

impl TestEnv {
    pub fn reports_dir(&self) -> PathBuf {
        self.config.reports_dir.clone()
    }
}

/// Create a migrated database with the admin seeded.
pub async fn setup() -> TestEnv {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");

    let config = Config {
        environment: Environment::Development,
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseSettings {
            url: format!("sqlite://{}?mode=rwc", db_path.display()),
            max_connections: 4,
            min_connections: 1,
            acquire_timeout_secs: 5,
            max_lifetime_secs: 60,
        },
        reports_dir: dir.path().join("reportes"),
        session_ttl_secs: 3600,
        admin_seed: AdminSeed {
            username: TEST_USERNAME.to_string(),
            password: SecretString::from(TEST_PASSWORD.to_string()),
        },
        static_dir: None,
    };

    let pool = DbPool::new(&config.database)
        .await
        .expect("Failed to open test database");
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");
    seed_admin(&pool, &config.admin_seed)
        .await
        .expect("Failed to seed admin");

    let storage = ReportStorage::new(&config.reports_dir)
        .await
        .expect("Failed to create reports dir");

    TestEnv {
        _dir: dir,
        pool,
        storage,
        config,
    }
}

/// Build the full application on top of a test environment.
pub async fn create_test_app(
    env: &TestEnv,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> + use<> {
    let views = Views::new().expect("Templates should parse");

    test::init_service(
        App::new()
            .wrap(RequestLogger)
            .app_data(web::Data::new(env.pool.clone()))
            .app_data(web::Data::new(env.storage.clone()))
            .app_data(web::Data::new(env.config.clone()))
            .app_data(web::Data::new(views))
            .configure(invernadero_lib::configure_app),
    )
    .await
}

/// Number of student rows holding an enrollment id.
pub async fn count_students_with_enrollment_id(env: &TestEnv, enrollment_id: &str) -> u64 {
    student::Entity::find()
        .filter(student::Column::EnrollmentId.eq(enrollment_id))
        .count(env.pool.connection())
        .await
        .expect("count students")
}

/// Session cookie set by a response, if any.
pub fn session_cookie(resp: &ServiceResponse) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE && !c.value().is_empty())
        .map(|c| c.into_owned())
}

/// Location header of a redirect.
pub fn location(resp: &ServiceResponse) -> Option<String> {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Submit the login form.
pub async fn post_login<S>(app: &S, username: &str, password: &str) -> ServiceResponse
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/")
        .set_form(vec![("username", username), ("password", password)])
        .to_request();
    test::call_service(app, req).await
}

/// Log in as the seeded admin and return the session cookie.
pub async fn login<S>(app: &S) -> Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let resp = post_login(app, TEST_USERNAME, TEST_PASSWORD).await;
    assert_eq!(resp.status(), StatusCode::FOUND, "login should redirect");
    session_cookie(&resp).expect("login should set a session cookie")
}

/// GET with a session cookie, returning status and JSON body.
pub async fn get_json<S>(app: &S, uri: &str, cookie: &Cookie<'static>) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::get()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// POST a JSON body with a session cookie, returning status and JSON body.
pub async fn post_json<S>(
    app: &S,
    uri: &str,
    cookie: &Cookie<'static>,
    body: Value,
) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .set_json(body)
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// DELETE with a session cookie, returning status and JSON body.
pub async fn delete_json<S>(app: &S, uri: &str, cookie: &Cookie<'static>) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::delete()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// GET a page with a session cookie, returning status and body text.
pub async fn get_page<S>(app: &S, uri: &str, cookie: &Cookie<'static>) -> (StatusCode, String)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::get()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

/// Names of the files currently in the reports directory, sorted.
pub async fn report_files(env: &TestEnv) -> Vec<String> {
    let mut names = Vec::new();
    let mut rd = tokio::fs::read_dir(env.reports_dir())
        .await
        .expect("reports dir should exist");
    while let Some(entry) = rd.next_entry().await.expect("read_dir entry") {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    names
}
