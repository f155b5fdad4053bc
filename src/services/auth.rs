//! Admin login, logout and identity endpoints.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::{info, warn};

use crate::auth::{AdminSession, SessionToken, password, token};
use crate::config::{AdminSeed, Config, SESSION_COOKIE};
use crate::db::{DbPool, admins, sessions};
use crate::error::{AppError, AppResult};
use crate::models::{LoginForm, UserInfo, admin::normalize_username};
use crate::views::Views;
use crate::views::flash::{Flash, FlashLevel};

const MSG_MISSING_FIELDS: &str = "Por favor, completa todos los campos.";
const MSG_BAD_CREDENTIALS: &str = "Acceso denegado. Credenciales incorrectas.";
const MSG_LOGIN_OK: &str = "Inicio de sesión exitoso.";
const MSG_LOGGED_OUT: &str = "Sesión cerrada correctamente.";

/// Configure login/logout routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login_page)
        .service(login)
        .service(logout)
        .service(user_info);
}

/// Insert the configured administrator if it does not exist yet.
pub async fn seed_admin(pool: &DbPool, seed: &AdminSeed) -> AppResult<()> {
    let username = normalize_username(&seed.username);
    if username.is_empty() {
        return Err(AppError::InvalidInput(
            "Admin username must not be empty".to_string(),
        ));
    }

    let hash = password::hash_password(seed.password.expose_secret())
        .map_err(|e| AppError::InvalidInput(format!("Failed to hash admin password: {}", e)))?;

    if admins::insert_if_absent(pool.connection(), &username, &hash).await? {
        info!("Seeded administrator '{}'", username);
    }
    Ok(())
}

/// Check a username/password pair. Unknown user and wrong password look the same.
async fn check_credentials(pool: &DbPool, form: &LoginForm) -> AppResult<Option<i32>> {
    let username = form.normalized_username();
    let Some(admin) = admins::find_by_username(pool.connection(), &username).await? else {
        return Ok(None);
    };

    let valid = password::verify_password(&form.password, &admin.password_hash)
        .map_err(|e| AppError::Database(format!("Stored password hash is invalid: {}", e)))?;

    Ok(valid.then_some(admin.id))
}

fn session_cookie(raw_token: String, ttl_secs: u64, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, raw_token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(secure);
    cookie.set_max_age(Duration::seconds(
        i64::try_from(ttl_secs).unwrap_or(i64::MAX),
    ));
    cookie
}

fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

fn redirect_to(location: &str) -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.append_header(("Location", location));
    builder
}

/// Login form.
#[get("/")]
pub async fn login_page(req: HttpRequest, views: web::Data<Views>) -> AppResult<HttpResponse> {
    views.page(&req, "login", json!({ "username": "" }))
}

/// Credential submission. Success sets the session cookie and redirects to the dashboard.
#[post("/")]
pub async fn login(
    req: HttpRequest,
    form: web::Form<LoginForm>,
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    views: web::Data<Views>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let username = form.normalized_username();

    if username.is_empty() || form.password.is_empty() {
        return views.page_with_flash(
            &req,
            "login",
            json!({ "username": username }),
            Flash::new(FlashLevel::Warning, MSG_MISSING_FIELDS),
        );
    }

    let Some(admin_id) = check_credentials(pool.get_ref(), &form).await? else {
        warn!(username = %username, "Failed login attempt");
        return views.page_with_flash(
            &req,
            "login",
            json!({ "username": username }),
            Flash::new(FlashLevel::Danger, MSG_BAD_CREDENTIALS),
        );
    };

    let db = pool.connection();
    let purged = sessions::purge_expired(db).await?;
    if purged > 0 {
        info!("Purged {} expired sessions", purged);
    }

    let raw_token = token::generate_token();
    sessions::insert(
        db,
        admin_id,
        &token::hash_token(&raw_token),
        config.session_ttl_secs,
    )
    .await?;

    info!(admin_id, username = %username, "Admin logged in");

    let secure = config.environment.is_production();
    Ok(redirect_to("/dashboard")
        .cookie(session_cookie(raw_token, config.session_ttl_secs, secure))
        .cookie(Flash::new(FlashLevel::Success, MSG_LOGIN_OK).to_cookie())
        .finish())
}

/// End the session. Always clears the cookie, even if the session was unknown.
#[post("/logout")]
pub async fn logout(req: HttpRequest, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE)
        && !cookie.value().is_empty()
    {
        let token = SessionToken::new(cookie.value().to_string());
        if sessions::delete_by_hash(pool.connection(), &token.hash()).await? {
            info!("Admin logged out");
        }
    }

    Ok(redirect_to("/")
        .cookie(removal_cookie())
        .cookie(Flash::new(FlashLevel::Info, MSG_LOGGED_OUT).to_cookie())
        .finish())
}

/// Current administrator.
#[utoipa::path(
    get,
    path = "/api/user-info",
    tag = "Auth",
    responses(
        (status = 200, description = "Logged-in administrator", body = UserInfo),
        (status = 401, description = "No session")
    ),
    security(
        ("session_cookie" = [])
    )
)]
#[get("/api/user-info")]
pub async fn user_info(auth: AdminSession) -> HttpResponse {
    let username = auth.context.username;
    HttpResponse::Ok().json(UserInfo {
        nombre: username.clone(),
        username,
    })
}
