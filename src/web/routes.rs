// src/web/routes.rs
use crate::{api::StudentApi, state::AppState, web::student_handlers};
use axum::{
    routing::{get, post},
    Router,
};
use tower_cookies::CookieManagerLayer;

pub fn create_router<A: StudentApi>(app_state: AppState<A>) -> Router {
    let student_routes = Router::new()
        .route("/", get(student_handlers::lookup_handler))
        .route("/{id}", get(student_handlers::student_page_handler::<A>))
        .route("/{id}/state", get(student_handlers::student_state_handler::<A>))
        .route("/{id}/reload", post(student_handlers::reload_handler::<A>))
        .route(
            "/{id}/attendances/{attendance_id}",
            post(student_handlers::edit_presence_handler::<A>),
        )
        .route(
            "/{id}/attendances/{attendance_id}/retry",
            post(student_handlers::retry_handler::<A>),
        )
        .route(
            "/{id}/attendances/{attendance_id}/revert",
            post(student_handlers::revert_handler::<A>),
        );

    Router::new()
        .route("/", get(student_handlers::index_handler))
        .nest("/students", student_routes)
        // The edit handlers read the csrftoken cookie
        .layer(CookieManagerLayer::new())
        .with_state(app_state)
}
