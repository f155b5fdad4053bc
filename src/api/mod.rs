//! HTTP endpoint modules.

pub mod attendance;
pub mod catalog;
pub mod health;
pub mod openapi;
pub mod pages;
pub mod projects;
pub mod reports;

pub use attendance::configure_routes as configure_attendance_routes;
pub use catalog::configure_routes as configure_catalog_routes;
pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use pages::configure_routes as configure_page_routes;
pub use projects::configure_routes as configure_project_routes;
pub use reports::configure_routes as configure_report_routes;
