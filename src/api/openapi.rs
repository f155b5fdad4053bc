//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::config::SESSION_COOKIE;
use crate::{api, error, models, services};

/// OpenAPI documentation for the JSON endpoints.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Invernadero Admin Server",
        version = "0.1.0",
        description = "Administration API for the greenhouse project: projects, reports, academic catalog and attendance"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Auth
        services::auth::user_info,
        // Projects
        api::projects::get_project,
        api::projects::update_project,
        api::projects::list_projects,
        // Reports
        api::reports::generate_report,
        api::reports::delete_report,
        api::reports::list_reports,
        // Catalog
        api::catalog::list_careers,
        api::catalog::list_groups,
        api::catalog::list_students,
        api::catalog::create_student,
        api::catalog::delete_student,
        // Attendance
        api::attendance::save_attendance,
        api::attendance::attendance_history,
        api::attendance::attendance_pdf,
    ),
    components(
        schemas(
            error::ErrorResponse,
            api::health::LivenessReport,
            api::health::ReadinessReport,
            api::health::ServiceInfo,
            models::UserInfo,
            models::SuccessResponse,
            models::ProjectDetail,
            models::ProjectSummary,
            models::ProjectUpdate,
            models::ReportListItem,
            models::CareerItem,
            models::GroupItem,
            models::StudentItem,
            models::CreateStudentRequest,
            models::AttendanceHistoryItem,
            models::SaveAttendanceResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Current administrator"),
        (name = "Projects", description = "Greenhouse project registry"),
        (name = "Reports", description = "Project report files"),
        (name = "Catalog", description = "Careers, groups and students"),
        (name = "Attendance", description = "Attendance history and sheets")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add session cookie security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Cookie(
                        utoipa::openapi::security::ApiKeyValue::new(SESSION_COOKIE),
                    ),
                ),
            );
        }
    }
}
