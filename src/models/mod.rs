//! Domain models for the greenhouse admin server.

pub mod admin;
pub mod attendance;
pub mod catalog;
pub mod observation;
pub mod project;
pub mod report;

// Re-export commonly used types
pub use admin::{LoginForm, SuccessResponse, UserInfo};
pub use attendance::{
    AttendanceHistoryItem, AttendanceSheet, HistoryQuery, Roster, RosterEntry, RosterQuery,
    SaveAttendanceResponse,
};
pub use catalog::{CareerItem, CreateStudentRequest, GroupItem, NewStudent, StudentItem};
pub use observation::{ObservationForm, ObservationItem};
pub use project::{ProjectDetail, ProjectSummary, ProjectUpdate};
pub use report::{REPORT_KIND_TEXT, ReportListItem};
