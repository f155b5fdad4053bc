//! Attendance roster and printable sheet assembly.

use chrono::NaiveDate;

use crate::db::{DbPool, attendance, catalog};
use crate::error::{AppError, AppResult};
use crate::models::{AttendanceSheet, Roster, RosterEntry, attendance::attendance_percentage};

/// Parse a `YYYY-MM-DD` query value.
pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidInput(format!("Fecha inválida: '{}'", raw)))
}

/// Roster of a group for a date, every student marked absent.
pub async fn build_roster(pool: &DbPool, group_id: i32, date: NaiveDate) -> AppResult<Roster> {
    let db = pool.connection();

    let (group, career) = catalog::find_group_with_career(db, group_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Grupo".to_string()))?;

    let alumnos = catalog::list_students_by_group(db, group.id)
        .await?
        .into_iter()
        .map(|s| RosterEntry {
            student_id: s.id,
            enrollment_id: s.enrollment_id,
            full_name: format!("{} {}", s.first_name, s.last_name),
            present: false,
        })
        .collect();

    Ok(Roster {
        carrera: career.map(|c| c.name).unwrap_or_default(),
        grupo: group.name,
        grupo_id: group.id,
        fecha: date,
        alumnos,
    })
}

/// Stored attendance session with its details and totals.
pub async fn build_sheet(pool: &DbPool, session_id: i32) -> AppResult<AttendanceSheet> {
    let db = pool.connection();

    let session = attendance::find_session(db, session_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Registro de asistencia".to_string()))?;

    let (grupo, carrera) = match catalog::find_group_with_career(db, session.group_id).await? {
        Some((group, career)) => (group.name, career.map(|c| c.name).unwrap_or_default()),
        None => (String::new(), String::new()),
    };

    let alumnos = attendance::session_entries(db, session.id).await?;
    let total = alumnos.len() as u64;
    let presentes = alumnos.iter().filter(|a| a.present).count() as u64;

    Ok(AttendanceSheet {
        id: session.id,
        fecha: session.date,
        carrera,
        grupo,
        presentes,
        total,
        porcentaje: attendance_percentage(presentes, total),
        alumnos,
    })
}
