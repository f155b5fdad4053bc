//! SeaORM entity definitions for the SQLite database.

pub mod academic_group;
pub mod admin;
pub mod admin_session;
pub mod attendance_detail;
pub mod attendance_session;
pub mod career;
pub mod observation;
pub mod project;
pub mod report;
pub mod student;
