// src/error.rs
use crate::api::ApiError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error("Backend client error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("CSRF token missing or does not match the csrftoken cookie")]
    CsrfMismatch,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Full detail goes to the log, the browser gets a short message
        tracing::error!("Request failed: {:?}", self);

        let (status, user_message) = match self {
            AppError::Template(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Could not render the page."),
            AppError::Api(_) => (StatusCode::BAD_GATEWAY, "The attendance backend is unavailable."),
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server misconfigured."),
            AppError::CsrfMismatch => (StatusCode::FORBIDDEN, "Form expired, reload the page and try again."),
        };

        (status, Html(format!(r#"
            <!DOCTYPE html><html><head><title>Error</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Error {status_code}</h1><p>{message}</p><a href="javascript:history.back()">Back</a></body></html>
         "#, status_code = status.as_u16(), message = user_message))).into_response()
    }
}

pub type AppResult<T = ()> = Result<T, AppError>;
