//! Liveness and readiness probes.

use actix_web::{HttpResponse, get, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::db::DbPool;

const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");
const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identity of the running server, shared by both probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    /// Package name, e.g. `invernadero-admin-server`
    pub name: &'static str,
    pub version: &'static str,
}

impl ServiceInfo {
    fn current() -> Self {
        Self {
            name: SERVICE_NAME,
            version: SERVICE_VERSION,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LivenessReport {
    pub status: &'static str,
    pub service: ServiceInfo,
    #[schema(value_type = String, format = DateTime)]
    pub checked_at: DateTime<Utc>,
}

/// Body of `GET /ready`. `database` is `ok` or `unreachable`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessReport {
    pub ready: bool,
    pub service: ServiceInfo,
    pub database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Process is up", body = LivenessReport)
    )
)]
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(LivenessReport {
        status: "alive",
        service: ServiceInfo::current(),
        checked_at: Utc::now(),
    })
}

/// Ready once the SQLite pool answers a ping.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable", body = ReadinessReport),
        (status = 503, description = "Database unreachable", body = ReadinessReport)
    )
)]
#[get("/ready")]
pub async fn ready(pool: web::Data<DbPool>) -> HttpResponse {
    if let Err(e) = pool.ping().await {
        warn!("Readiness probe failed: {}", e);
        return HttpResponse::ServiceUnavailable().json(ReadinessReport {
            ready: false,
            service: ServiceInfo::current(),
            database: "unreachable",
            error: Some("La base de datos no responde"),
        });
    }

    HttpResponse::Ok().json(ReadinessReport {
        ready: true,
        service: ServiceInfo::current(),
        database: "ok",
        error: None,
    })
}

pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(ready);
}
