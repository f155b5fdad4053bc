//! Attendance models: roster rendering, history rows and the printable sheet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query of `GET /lista-asistencia`.
#[derive(Debug, Deserialize)]
pub struct RosterQuery {
    pub grupo_id: i32,
    pub fecha: String,
}

/// Query of `GET /api/historial-asistencia`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct HistoryQuery {
    /// Group to list sessions for
    pub grupo_id: i32,
}

/// One line of an attendance roster or sheet.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RosterEntry {
    #[serde(rename = "alumno_id")]
    pub student_id: i32,
    #[serde(rename = "matricula")]
    pub enrollment_id: String,
    #[serde(rename = "nombre")]
    pub full_name: String,
    #[serde(rename = "asistencia")]
    pub present: bool,
}

/// Roster for one group on one date; every student starts absent.
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    pub carrera: String,
    pub grupo: String,
    pub grupo_id: i32,
    pub fecha: NaiveDate,
    pub alumnos: Vec<RosterEntry>,
}

/// Stored attendance session summary.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttendanceHistoryItem {
    pub id: i32,
    #[schema(value_type = String, format = Date)]
    pub fecha: NaiveDate,
    pub grupo_id: i32,
    pub presentes: u64,
    pub total: u64,
    pub porcentaje: u32,
}

/// Stored attendance session with its details, rendered as the printable sheet.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceSheet {
    pub id: i32,
    pub fecha: NaiveDate,
    pub carrera: String,
    pub grupo: String,
    pub presentes: u64,
    pub total: u64,
    pub porcentaje: u32,
    pub alumnos: Vec<RosterEntry>,
}

/// Response of the attendance save stub.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaveAttendanceResponse {
    pub success: bool,
    pub message: String,
    /// Always false: the payload is logged but not stored.
    pub persisted: bool,
}

/// Whole-number percentage of present students, 0 for an empty group.
pub fn attendance_percentage(present: u64, total: u64) -> u32 {
    if total == 0 {
        0
    } else {
        ((present * 100) / total) as u32
    }
}
