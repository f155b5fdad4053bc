//! Read-only database operations for attendance sessions.
//!
//! Nothing in the application writes these tables yet.

use sea_orm::*;

use crate::entity::attendance_detail::{self, Entity as AttendanceDetail};
use crate::entity::attendance_session::{self, Entity as AttendanceSession};
use crate::entity::student::Entity as Student;
use crate::error::AppResult;
use crate::models::{AttendanceHistoryItem, RosterEntry, attendance::attendance_percentage};

/// Sessions stored for a group with their presence counts, newest first.
pub async fn history_for_group(
    db: &DatabaseConnection,
    group_id: i32,
) -> AppResult<Vec<AttendanceHistoryItem>> {
    let sessions = AttendanceSession::find()
        .filter(attendance_session::Column::GroupId.eq(group_id))
        .order_by_desc(attendance_session::Column::Date)
        .all(db)
        .await?;

    let mut items = Vec::with_capacity(sessions.len());
    for session in sessions {
        let (present, total) = presence_counts(db, session.id).await?;
        items.push(AttendanceHistoryItem {
            id: session.id,
            fecha: session.date,
            grupo_id: session.group_id,
            presentes: present,
            total,
            porcentaje: attendance_percentage(present, total),
        });
    }

    Ok(items)
}

async fn presence_counts(db: &DatabaseConnection, session_id: i32) -> AppResult<(u64, u64)> {
    let total = AttendanceDetail::find()
        .filter(attendance_detail::Column::SessionId.eq(session_id))
        .count(db)
        .await?;
    let present = AttendanceDetail::find()
        .filter(attendance_detail::Column::SessionId.eq(session_id))
        .filter(attendance_detail::Column::Present.eq(true))
        .count(db)
        .await?;

    Ok((present, total))
}

pub async fn find_session(
    db: &DatabaseConnection,
    id: i32,
) -> AppResult<Option<attendance_session::Model>> {
    Ok(AttendanceSession::find_by_id(id).one(db).await?)
}

/// Detail lines of a session with student identity, ordered by name.
pub async fn session_entries(
    db: &DatabaseConnection,
    session_id: i32,
) -> AppResult<Vec<RosterEntry>> {
    let rows = AttendanceDetail::find()
        .filter(attendance_detail::Column::SessionId.eq(session_id))
        .find_also_related(Student)
        .all(db)
        .await?;

    let mut entries: Vec<RosterEntry> = rows
        .into_iter()
        .filter_map(|(detail, student)| {
            student.map(|s| RosterEntry {
                student_id: s.id,
                enrollment_id: s.enrollment_id,
                full_name: format!("{} {}", s.first_name, s.last_name),
                present: detail.present,
            })
        })
        .collect();
    entries.sort_by(|a, b| a.full_name.cmp(&b.full_name));

    Ok(entries)
}

/// Total stored sessions and detail rows.
pub async fn row_counts(db: &DatabaseConnection) -> AppResult<(u64, u64)> {
    let sessions = AttendanceSession::find().count(db).await?;
    let details = AttendanceDetail::find().count(db).await?;
    Ok((sessions, details))
}
