// src/web/student_handlers.rs
use crate::{
    api::StudentApi,
    error::AppResult,
    models::attendance::Presence,
    services::view_service,
    state::AppState,
    templates::{student_path, IndexPage, StudentPage},
    view::StudentView,
    web::csrf::{cookie_token, verified_context},
};
use askama::Template;
use axum::{
    extract::{Form, Path, Query, State},
    response::{Html, Redirect},
    Json,
};
use serde::Deserialize;
use tower_cookies::Cookies;

// GET /
pub async fn index_handler() -> AppResult<Html<String>> {
    Ok(Html(IndexPage.render()?))
}

#[derive(Deserialize, Debug)]
pub struct LookupQuery {
    id: Option<String>,
}

// GET /students?id=12 (the lookup form on the index page)
pub async fn lookup_handler(Query(query): Query<LookupQuery>) -> Redirect {
    match query.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Redirect::to(&student_path(id)),
        _ => Redirect::to("/"),
    }
}

/// GET /students/{id}
/// Renders the mounted view, mounting it on first display.
pub async fn student_page_handler<A: StudentApi>(
    State(state): State<AppState<A>>,
    Path(student_id): Path<String>,
    cookies: Cookies,
) -> AppResult<Html<String>> {
    tracing::debug!("GET /students/{}", student_id);
    let view = view_service::current_or_mount(&state, &student_id).await;
    Ok(Html(StudentPage::new(&view, cookie_token(&cookies)).render()?))
}

/// GET /students/{id}/state
/// Same view as the page, as JSON.
pub async fn student_state_handler<A: StudentApi>(
    State(state): State<AppState<A>>,
    Path(student_id): Path<String>,
) -> Json<StudentView> {
    Json(view_service::current_or_mount(&state, &student_id).await)
}

/// Hidden field every form on the student page posts back.
#[derive(Deserialize, Debug)]
pub struct CsrfForm {
    #[serde(default)]
    pub csrf_token: String,
}

// POST /students/{id}/reload
pub async fn reload_handler<A: StudentApi>(
    State(state): State<AppState<A>>,
    Path(student_id): Path<String>,
    cookies: Cookies,
    Form(form): Form<CsrfForm>,
) -> AppResult<Redirect> {
    verified_context(&cookies, &form.csrf_token)?;
    tracing::info!("Reloading view for student {}", student_id);
    view_service::mount(&state, &student_id).await;
    Ok(Redirect::to(&student_path(&student_id)))
}

#[derive(Deserialize, Debug)]
pub struct PresenceForm {
    pub presence: Presence, // PR / EX / UN, straight from the select
    #[serde(default)]
    pub csrf_token: String,
}

/// POST /students/{id}/attendances/{attendance_id}
/// The select's change event. Unknown attendance ids are ignored.
pub async fn edit_presence_handler<A: StudentApi>(
    State(state): State<AppState<A>>,
    Path((student_id, attendance_id)): Path<(String, i64)>,
    cookies: Cookies,
    Form(form): Form<PresenceForm>,
) -> AppResult<Redirect> {
    let ctx = verified_context(&cookies, &form.csrf_token)?;
    tracing::debug!(
        "Edit student {} attendance {} -> {}",
        student_id,
        attendance_id,
        form.presence.code()
    );
    // The write runs in the background; the page shows it as pending
    view_service::edit_presence(&state, &student_id, attendance_id, form.presence, ctx).await;
    Ok(Redirect::to(&student_path(&student_id)))
}

// POST /students/{id}/attendances/{attendance_id}/retry
pub async fn retry_handler<A: StudentApi>(
    State(state): State<AppState<A>>,
    Path((student_id, attendance_id)): Path<(String, i64)>,
    cookies: Cookies,
    Form(form): Form<CsrfForm>,
) -> AppResult<Redirect> {
    let ctx = verified_context(&cookies, &form.csrf_token)?;
    if view_service::retry(&state, &student_id, attendance_id, ctx).await.is_none() {
        tracing::debug!("Nothing to retry for attendance {} of student {}", attendance_id, student_id);
    }
    Ok(Redirect::to(&student_path(&student_id)))
}

// POST /students/{id}/attendances/{attendance_id}/revert
pub async fn revert_handler<A: StudentApi>(
    State(state): State<AppState<A>>,
    Path((student_id, attendance_id)): Path<(String, i64)>,
    cookies: Cookies,
    Form(form): Form<CsrfForm>,
) -> AppResult<Redirect> {
    verified_context(&cookies, &form.csrf_token)?;
    if !view_service::revert(&state, &student_id, attendance_id).await {
        tracing::debug!("Nothing to revert for attendance {} of student {}", attendance_id, student_id);
    }
    Ok(Redirect::to(&student_path(&student_id)))
}
