use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use student_view::{
    api::{ApiError, RequestContext, StudentApi},
    models::{
        attendance::{Attendance, Presence, PresenceUpdate},
        student::{Course, Mentor, Person, Section, Student},
    },
};

/// A backend call as the fake saw it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Details(String),
    Attendances(String),
    Update {
        student_id: String,
        update: PresenceUpdate,
        csrf_token: String,
    },
}

#[derive(Default)]
struct FakeBackend {
    student: Option<Student>,
    attendances: Option<Vec<Attendance>>,
    fail_writes: bool,
    calls: Vec<Call>,
}

/// In-memory `StudentApi` that records every call.
/// A `None` slot answers that read with a 404.
#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<FakeBackend>>,
}

#[allow(dead_code)]
impl FakeApi {
    pub fn new(student: Option<Student>, attendances: Option<Vec<Attendance>>) -> Self {
        let api = Self::default();
        {
            let mut inner = api.inner.lock().unwrap();
            inner.student = student;
            inner.attendances = attendances;
        }
        api
    }

    /// Changes what later detail reads answer.
    pub fn set_student(&self, student: Option<Student>) {
        self.inner.lock().unwrap().student = student;
    }

    /// Changes what later attendance reads answer.
    pub fn set_attendances(&self, attendances: Option<Vec<Attendance>>) {
        self.inner.lock().unwrap().attendances = attendances;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_writes = fail;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn updates(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Update { .. }))
            .collect()
    }

    fn not_found(url: &str) -> ApiError {
        ApiError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            url: url.to_string(),
        }
    }
}

impl StudentApi for FakeApi {
    async fn student_details(&self, student_id: &str) -> Result<Student, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Details(student_id.to_string()));
        inner.student.clone().ok_or_else(|| Self::not_found("details"))
    }

    async fn student_attendances(&self, student_id: &str) -> Result<Vec<Attendance>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Attendances(student_id.to_string()));
        inner.attendances.clone().ok_or_else(|| Self::not_found("attendance"))
    }

    async fn update_presence(
        &self,
        student_id: &str,
        update: &PresenceUpdate,
        ctx: &RequestContext,
    ) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Update {
            student_id: student_id.to_string(),
            update: *update,
            csrf_token: ctx.csrf_token.clone(),
        });
        if inner.fail_writes {
            Err(ApiError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                url: "attendances".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[allow(dead_code)]
pub fn student() -> Student {
    Student {
        id: 12,
        user: Person {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
        },
        course: Course {
            id: 70,
            name: "CS70".into(),
        },
        section: Section {
            mentor: Mentor {
                user: Person {
                    first_name: "Edsger".into(),
                    last_name: "Dijkstra".into(),
                },
            },
        },
    }
}

/// Deliberately out of date order.
#[allow(dead_code)]
pub fn attendances() -> Vec<Attendance> {
    vec![
        Attendance { id: 3, date: "2024-09-19".into(), presence: Presence::Present },
        Attendance { id: 1, date: "2024-09-05".into(), presence: Presence::Present },
        Attendance { id: 2, date: "2024-09-12".into(), presence: Presence::Unexcused },
    ]
}

/// Polls `check` until it holds or a second has passed.
#[allow(dead_code)]
pub async fn eventually<F: FnMut() -> bool>(mut check: F) -> bool {
    for _ in 0..100 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
