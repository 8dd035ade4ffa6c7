// src/api/mod.rs
//
// Seam between the view and the REST backend. The view server talks to the
// backend only through `StudentApi`, so tests can swap in a recording fake.
pub mod backend_client;

use crate::models::{
    attendance::{Attendance, PresenceUpdate},
    student::Student,
};
use std::future::Future;
use thiserror::Error;

pub use backend_client::BackendClient;

/// Name of the cookie the backend issues its CSRF token in.
pub const CSRF_COOKIE: &str = "csrftoken";
/// Header the backend expects the CSRF token in on mutating requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend answered {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

/// Per-request values the view needs for mutating calls.
/// Built by the web layer from the incoming request, never looked up ambiently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub csrf_token: String, // empty when the browser sent no csrftoken cookie
}

impl RequestContext {
    pub fn with_csrf_token(token: impl Into<String>) -> Self {
        Self { csrf_token: token.into() }
    }
}

pub trait StudentApi: Clone + Send + Sync + 'static {
    /// `GET /api/students/{id}/details/`
    fn student_details(
        &self,
        student_id: &str,
    ) -> impl Future<Output = Result<Student, ApiError>> + Send;

    /// `GET /api/students/{id}/attendance/`
    fn student_attendances(
        &self,
        student_id: &str,
    ) -> impl Future<Output = Result<Vec<Attendance>, ApiError>> + Send;

    /// `PUT /api/students/{id}/attendances/`; the response body is not consumed.
    fn update_presence(
        &self,
        student_id: &str,
        update: &PresenceUpdate,
        ctx: &RequestContext,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}
