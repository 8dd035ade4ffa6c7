// src/view/mod.rs
//
// Local mirror of one student's profile and attendance roster. Pure state:
// no I/O happens here, the service layer dispatches the writes this returns.
pub mod ordering;

use crate::models::{
    attendance::{Attendance, Presence, PresenceUpdate},
    student::Student,
};
use serde::Serialize;

pub use ordering::{compare_dates, sort_attendances};

/// Whether a row's displayed presence is known to match the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SyncState {
    Synced,
    Pending { write: u64 },
    OutOfSync { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRow {
    pub attendance: Attendance,
    /// Last value the backend acknowledged (or loaded with).
    pub confirmed: Presence,
    pub sync: SyncState,
}

impl AttendanceRow {
    fn loaded(attendance: Attendance) -> Self {
        Self {
            confirmed: attendance.presence,
            attendance,
            sync: SyncState::Synced,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.sync, SyncState::Pending { .. })
    }

    pub fn sync_error(&self) -> Option<&str> {
        match &self.sync {
            SyncState::OutOfSync { error } => Some(error),
            _ => None,
        }
    }
}

/// A write the view wants sent to the backend. `write` identifies it so a late
/// result can be told apart from the result of a newer edit of the same row.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingWrite {
    pub write: u64,
    pub student_id: String,
    pub update: PresenceUpdate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentView {
    pub student_id: String,
    pub student: Option<Student>,
    pub rows: Vec<AttendanceRow>,
    /// False when the attendance read failed, as opposed to returning no records.
    pub attendances_loaded: bool,
    #[serde(skip)]
    next_write: u64,
}

impl StudentView {
    /// Builds the view from whatever the two reads produced.
    /// A missing slot stays empty; attendances are ordered oldest first.
    pub fn mounted(
        student_id: impl Into<String>,
        student: Option<Student>,
        attendances: Option<Vec<Attendance>>,
    ) -> Self {
        let attendances_loaded = attendances.is_some();
        let rows = sort_attendances(attendances.unwrap_or_default())
            .into_iter()
            .map(AttendanceRow::loaded)
            .collect();

        Self {
            student_id: student_id.into(),
            student,
            rows,
            attendances_loaded,
            next_write: 0,
        }
    }

    /// Continues `previous`'s write numbering, so results of writes issued
    /// before a remount can never be mistaken for writes issued after it.
    pub fn continue_writes_from(&mut self, previous: &StudentView) {
        self.next_write = self.next_write.max(previous.next_write);
    }

    /// Either read failed when this view was mounted; the next display fetches again.
    pub fn needs_refetch(&self) -> bool {
        self.student.is_none() || !self.attendances_loaded
    }

    /// True while any row has a write in flight or a failed write to show.
    pub fn has_unsettled_rows(&self) -> bool {
        self.rows.iter().any(|r| r.sync != SyncState::Synced)
    }

    pub fn row(&self, attendance_id: i64) -> Option<&AttendanceRow> {
        self.rows.iter().find(|r| r.attendance.id == attendance_id)
    }

    fn row_mut(&mut self, attendance_id: i64) -> Option<&mut AttendanceRow> {
        self.rows.iter_mut().find(|r| r.attendance.id == attendance_id)
    }

    fn issue_write(&mut self, attendance_id: i64) -> Option<PendingWrite> {
        self.next_write += 1;
        let write = self.next_write;
        let student_id = self.student_id.clone();

        let row = self.row_mut(attendance_id)?;
        row.sync = SyncState::Pending { write };
        Some(PendingWrite {
            write,
            student_id,
            update: PresenceUpdate {
                id: attendance_id,
                presence: row.attendance.presence,
            },
        })
    }

    /// Optimistically applies a presence change.
    /// Returns `None`, leaving the view untouched, when the id is not in the roster.
    pub fn edit_presence(&mut self, attendance_id: i64, presence: Presence) -> Option<PendingWrite> {
        let row = self.row_mut(attendance_id)?;
        row.attendance.presence = presence;
        self.issue_write(attendance_id)
    }

    /// Applies the backend's answer to `write`. Returns false when the result
    /// was for a write that has since been superseded.
    pub fn complete_write(&mut self, write: &PendingWrite, result: Result<(), String>) -> bool {
        let Some(row) = self.row_mut(write.update.id) else {
            return false;
        };

        if row.sync != (SyncState::Pending { write: write.write }) {
            // Superseded. A late success still tells us what the backend stored,
            // unless the row was settled since (newer write, or a fresh load).
            if result.is_ok() && row.sync != SyncState::Synced {
                row.confirmed = write.update.presence;
            }
            return false;
        }

        match result {
            Ok(()) => {
                row.confirmed = write.update.presence;
                row.sync = SyncState::Synced;
            }
            Err(error) => row.sync = SyncState::OutOfSync { error },
        }
        true
    }

    /// Re-sends the displayed value of an out-of-sync row.
    pub fn retry(&mut self, attendance_id: i64) -> Option<PendingWrite> {
        self.row(attendance_id)?.sync_error()?;
        self.issue_write(attendance_id)
    }

    /// Drops a failed edit, restoring the last acknowledged value. Sends nothing.
    pub fn revert(&mut self, attendance_id: i64) -> bool {
        match self.row_mut(attendance_id) {
            Some(row) if row.sync_error().is_some() => {
                row.attendance.presence = row.confirmed;
                row.sync = SyncState::Synced;
                true
            }
            _ => false,
        }
    }
}
