//! Teacher-centric views: the students a teacher leads.

use academy_core::roles::Role;
use academy_core::types::DbId;
use academy_db::models::group::Group;
use academy_db::models::person::Person;
use academy_db::repositories::GroupRepo;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::person::require_role;
use crate::response::DataResponse;
use crate::state::AppState;

pub const MESSAGE_ALL_STUDENTS: &str = "All students";
pub const MESSAGE_NO_GROUP: &str = "Teacher does not lead any group";

/// Students of the group a teacher leads.
#[derive(Debug, Serialize)]
pub struct TeacherStudents {
    /// The teacher's group, or `null` when they lead none.
    pub group: Option<Group>,
    pub students: Vec<Person>,
    pub message: &'static str,
}

/// GET /api/v1/teachers/{id}/students
///
/// A teacher without a group gets an empty list and an explanatory
/// message rather than a 404. If the teacher leads several groups, the
/// oldest one is shown.
pub async fn students(
    State(state): State<AppState>,
    Path(teacher_id): Path<DbId>,
) -> AppResult<Json<DataResponse<TeacherStudents>>> {
    require_role(&state, teacher_id, Role::Teacher).await?;

    let Some(group) = GroupRepo::find_by_teacher(&state.pool, teacher_id)
        .await?
        .into_iter()
        .next()
    else {
        return Ok(Json(DataResponse {
            data: TeacherStudents {
                group: None,
                students: Vec::new(),
                message: MESSAGE_NO_GROUP,
            },
        }));
    };

    let students = GroupRepo::list_students(&state.pool, group.id).await?;
    Ok(Json(DataResponse {
        data: TeacherStudents {
            group: Some(group),
            students,
            message: MESSAGE_ALL_STUDENTS,
        },
    }))
}
