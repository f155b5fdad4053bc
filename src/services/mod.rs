//! Business logic services.

pub mod attendance;
pub mod auth;
pub mod reports;
pub mod storage;

pub use auth::{configure_routes as configure_auth_routes, seed_admin};
pub use storage::ReportStorage;
