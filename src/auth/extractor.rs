//! Actix-web extractors that gate handlers on a valid admin session.
//!
//! # Security
//! - The session cookie value is wrapped in `SecretString` immediately
//! - Tokens are never logged; only their SHA-256 hash reaches the database
//! - Expired and unknown sessions are treated the same way

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use super::{AuthContext, SessionToken, resolve_session};
use crate::config::SESSION_COOKIE;
use crate::db::DbPool;
use crate::error::AppError;
use crate::views::flash::{Flash, FlashLevel};

fn session_token(req: &HttpRequest) -> Option<SessionToken> {
    req.cookie(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .map(SessionToken::new)
}

async fn authenticate(
    pool: Option<web::Data<DbPool>>,
    token: Option<SessionToken>,
) -> Result<AuthContext, AppError> {
    let pool = pool.ok_or_else(|| {
        AppError::Database("Database pool not configured".to_string())
    })?;
    let token =
        token.ok_or_else(|| AppError::Unauthorized("inicia sesión para continuar".to_string()))?;

    resolve_session(pool.get_ref(), &token)
        .await?
        .ok_or_else(|| AppError::Unauthorized("sesión no válida o expirada".to_string()))
}

/// Extractor for JSON endpoints: answers 401 without a valid session.
///
/// ```ignore
/// async fn handler(auth: AdminSession) -> impl Responder {
///     // auth.context.admin_id is the logged-in administrator
/// }
/// ```
pub struct AdminSession {
    pub context: AuthContext,
}

impl FromRequest for AdminSession {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let pool = req.app_data::<web::Data<DbPool>>().cloned();
        let token = session_token(req);

        Box::pin(async move {
            let context = authenticate(pool, token).await?;
            Ok(AdminSession { context })
        })
    }
}

/// Extractor for HTML pages: redirects to the login form without a valid session.
pub struct PageSession {
    pub context: AuthContext,
}

/// Rejection of `PageSession`: a redirect to the login page with a warning.
#[derive(Debug)]
pub struct LoginRequired;

impl std::fmt::Display for LoginRequired {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "login required")
    }
}

impl ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        let flash = Flash::new(FlashLevel::Warning, "Acceso restringido. Inicia sesión.");
        HttpResponse::Found()
            .cookie(flash.to_cookie())
            .append_header(("Location", "/"))
            .finish()
    }
}

impl FromRequest for PageSession {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let pool = req.app_data::<web::Data<DbPool>>().cloned();
        let token = session_token(req);

        Box::pin(async move {
            match authenticate(pool, token).await {
                Ok(context) => Ok(PageSession { context }),
                Err(AppError::Unauthorized(_)) => Err(LoginRequired.into()),
                Err(e) => {
                    warn!("Session lookup failed: {}", e);
                    Err(e.into())
                }
            }
        })
    }
}
