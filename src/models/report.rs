//! Report metadata models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Kind recorded for plain-text project snapshots.
pub const REPORT_KIND_TEXT: &str = "texto";

/// Report row joined with its project name.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportListItem {
    pub id: i32,
    #[serde(rename = "proyecto_id")]
    pub project_id: i32,
    #[serde(rename = "proyecto_nombre")]
    pub project_name: String,
    #[serde(rename = "nombre_archivo")]
    pub file_name: String,
    #[serde(rename = "fecha_generacion")]
    pub generated_at: DateTime<Utc>,
    #[serde(rename = "tipo")]
    pub kind: String,
}
