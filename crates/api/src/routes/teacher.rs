//! Route definitions for teacher-scoped sub-resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::{salary, teacher};
use crate::state::AppState;

/// Routes mounted at `/teachers`.
///
/// ```text
/// GET    /{teacher_id}/salaries           -> list_by_teacher
/// POST   /{teacher_id}/salaries           -> create_for_teacher
/// GET    /{teacher_id}/salaries/average   -> average_for_teacher (?months=)
/// GET    /{teacher_id}/students           -> students
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{teacher_id}/salaries",
            get(salary::list_by_teacher).post(salary::create_for_teacher),
        )
        .route(
            "/{teacher_id}/salaries/average",
            get(salary::average_for_teacher),
        )
        .route("/{teacher_id}/students", get(teacher::students))
}
