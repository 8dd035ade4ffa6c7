// src/templates.rs
use crate::{
    models::{attendance::Presence, student::Student},
    view::{AttendanceRow, StudentView},
    web::csrf::CSRF_FIELD,
};
use askama::Template;

/// URL path of a student's view, with the id percent-encoded.
pub fn student_path(student_id: &str) -> String {
    format!("/students/{}", urlencoding::encode(student_id))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage;

/// One `<option>` of a row's presence select.
pub struct PresenceOption {
    pub code: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Display form of an `AttendanceRow`.
pub struct AttendanceLine<'a> {
    pub id: i64,
    pub date: &'a str,
    pub options: Vec<PresenceOption>,
    pub pending: bool,
    pub sync_error: Option<&'a str>,
}

impl<'a> AttendanceLine<'a> {
    fn from_row(row: &'a AttendanceRow) -> Self {
        let options = Presence::ALL
            .iter()
            .map(|&p| PresenceOption {
                code: p.code(),
                label: p.label(),
                selected: p == row.attendance.presence,
            })
            .collect();

        Self {
            id: row.attendance.id,
            date: &row.attendance.date,
            options,
            pending: row.is_pending(),
            sync_error: row.sync_error(),
        }
    }
}

#[derive(Template)]
#[template(path = "student.html")]
pub struct StudentPage<'a> {
    pub student_id: &'a str,
    pub base_path: String,
    // None suppresses the whole detail panel
    pub student: Option<&'a Student>,
    pub attendances: Vec<AttendanceLine<'a>>,
    // Echoed back by every form on the page
    pub csrf_field: &'static str,
    pub csrf_token: String,
}

impl<'a> StudentPage<'a> {
    pub fn new(view: &'a StudentView, csrf_token: String) -> Self {
        Self {
            csrf_field: CSRF_FIELD,
            csrf_token,
            student_id: &view.student_id,
            base_path: student_path(&view.student_id),
            student: view.student.as_ref(),
            attendances: view.rows.iter().map(AttendanceLine::from_row).collect(),
        }
    }
}
