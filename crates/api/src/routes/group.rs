//! Route definitions for the `/groups` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::group;
use crate::state::AppState;

/// Routes mounted at `/groups`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id (with teacher, students, subjects)
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
/// GET    /{id}/students                 -> list_students
/// PUT    /{id}/students/{student_id}    -> add_student
/// DELETE /{id}/students/{student_id}    -> remove_student
/// PUT    /{id}/subjects/{subject_id}    -> add_subject
/// DELETE /{id}/subjects/{subject_id}    -> remove_subject
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(group::list).post(group::create))
        .route(
            "/{id}",
            get(group::get_by_id)
                .put(group::update)
                .delete(group::delete),
        )
        .route("/{id}/students", get(group::list_students))
        .route(
            "/{id}/students/{student_id}",
            put(group::add_student).delete(group::remove_student),
        )
        .route(
            "/{id}/subjects/{subject_id}",
            put(group::add_subject).delete(group::remove_subject),
        )
}
