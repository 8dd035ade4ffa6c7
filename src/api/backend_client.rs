// src/api/backend_client.rs
use super::{ApiError, RequestContext, StudentApi, CSRF_COOKIE, CSRF_HEADER};
use crate::models::{
    attendance::{Attendance, PresenceUpdate},
    student::Student,
};
use reqwest::{header, Client, Response};
use std::time::Duration;

// Path segments under /api/students/{id}/. Reads use the singular
// `attendance`, the update uses the plural `attendances`, as the backend routes them.
const DETAILS_ENDPOINT: &str = "details";
const ATTENDANCE_READ_ENDPOINT: &str = "attendance";
const ATTENDANCE_WRITE_ENDPOINT: &str = "attendances";

/// `StudentApi` over HTTP. Cheap to clone: the reqwest client is reference counted.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn student_url(&self, student_id: &str, endpoint: &str) -> String {
        format!(
            "{}/api/students/{}/{}/",
            self.base_url,
            urlencoding::encode(student_id),
            endpoint
        )
    }
}

fn check_status(response: Response, url: &str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status,
            url: url.to_string(),
        })
    }
}

impl StudentApi for BackendClient {
    async fn student_details(&self, student_id: &str) -> Result<Student, ApiError> {
        let url = self.student_url(student_id, DETAILS_ENDPOINT);
        tracing::debug!("GET {}", url);
        let response = check_status(self.http.get(&url).send().await?, &url)?;
        Ok(response.json::<Student>().await?)
    }

    async fn student_attendances(&self, student_id: &str) -> Result<Vec<Attendance>, ApiError> {
        let url = self.student_url(student_id, ATTENDANCE_READ_ENDPOINT);
        tracing::debug!("GET {}", url);
        let response = check_status(self.http.get(&url).send().await?, &url)?;
        Ok(response.json::<Vec<Attendance>>().await?)
    }

    async fn update_presence(
        &self,
        student_id: &str,
        update: &PresenceUpdate,
        ctx: &RequestContext,
    ) -> Result<(), ApiError> {
        let url = self.student_url(student_id, ATTENDANCE_WRITE_ENDPOINT);
        tracing::debug!("PUT {} id={} presence={}", url, update.id, update.presence.code());

        let mut request = self
            .http
            .put(&url)
            .header(CSRF_HEADER, ctx.csrf_token.as_str())
            .json(update);
        // The backend checks the header against its cookie, so forward both
        if !ctx.csrf_token.is_empty() {
            request = request.header(header::COOKIE, format!("{}={}", CSRF_COOKIE, ctx.csrf_token));
        }

        check_status(request.send().await?, &url)?;
        Ok(())
    }
}
