//! Greenhouse admin server library.
//!
//! Session-gated administration of greenhouse projects, observations,
//! generated reports, the academic catalog and attendance.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
pub mod views;

use actix_web::web;

/// Register every route of the application.
///
/// Shared between the binary and the integration tests so both serve the
/// same surface.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .configure(api::configure_health_routes)
        .configure(services::configure_auth_routes)
        .configure(api::configure_page_routes)
        .configure(api::configure_project_routes)
        .configure(api::configure_report_routes)
        .configure(api::configure_catalog_routes)
        .configure(api::configure_attendance_routes);
}
