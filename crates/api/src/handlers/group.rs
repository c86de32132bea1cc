//! Handlers for the `/groups` resource and its student / subject
//! memberships.

use academy_core::error::CoreError;
use academy_core::naming::validate_display_name;
use academy_core::types::DbId;
use academy_db::models::group::{CreateGroup, Group, GroupDetail, UpdateGroup};
use academy_db::models::person::Person;
use academy_db::repositories::{GroupRepo, PersonRepo, SubjectRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

async fn require_group(state: &AppState, id: DbId) -> AppResult<Group> {
    GroupRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Group", id))
}

/// Assemble a group with its teacher, students and subjects.
async fn load_detail(state: &AppState, group: Group) -> AppResult<GroupDetail> {
    let teacher = match group.teacher_id {
        Some(teacher_id) => PersonRepo::find_by_id(&state.pool, teacher_id).await?,
        None => None,
    };
    let students = GroupRepo::list_students(&state.pool, group.id).await?;
    let subjects = GroupRepo::list_subjects(&state.pool, group.id).await?;
    Ok(GroupDetail {
        group,
        teacher,
        students,
        subjects,
    })
}

/// POST /api/v1/groups
///
/// The teacher and all initial students are role-checked; any violation
/// rejects the whole request and nothing is written.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateGroup>,
) -> AppResult<(StatusCode, Json<DataResponse<GroupDetail>>)> {
    input.validate()?;
    validate_display_name("Group title", &input.title)?;

    let group = GroupRepo::create(&state.pool, &input).await??;
    tracing::info!(
        group_id = group.id,
        teacher_id = ?group.teacher_id,
        students = input.student_ids.len(),
        "Group created"
    );
    let detail = load_detail(&state, group).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/groups
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Group>>>> {
    let groups = GroupRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: groups }))
}

/// GET /api/v1/groups/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GroupDetail>>> {
    let group = require_group(&state, id).await?;
    let detail = load_detail(&state, group).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/groups/{id}
///
/// An unknown group is reported before the new teacher is role-checked.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGroup>,
) -> AppResult<Json<DataResponse<Group>>> {
    input.validate()?;
    if let Some(title) = &input.title {
        validate_display_name("Group title", title)?;
    }
    require_group(&state, id).await?;

    let group = GroupRepo::update(&state.pool, id, &input)
        .await??
        .ok_or_else(|| not_found("Group", id))?;
    tracing::info!(group_id = id, "Group updated");
    Ok(Json(DataResponse { data: group }))
}

/// DELETE /api/v1/groups/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if GroupRepo::delete(&state.pool, id).await? {
        tracing::info!(group_id = id, "Group deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Group", id))
    }
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

/// GET /api/v1/groups/{id}/students
pub async fn list_students(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Person>>>> {
    require_group(&state, id).await?;
    let students = GroupRepo::list_students(&state.pool, id).await?;
    Ok(Json(DataResponse { data: students }))
}

/// PUT /api/v1/groups/{id}/students/{student_id}
///
/// Idempotent: adding a student who is already a member is a no-op.
pub async fn add_student(
    State(state): State<AppState>,
    Path((id, student_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    require_group(&state, id).await?;
    let added = GroupRepo::add_student(&state.pool, id, student_id).await??;
    if added {
        tracing::info!(group_id = id, student_id, "Student added to group");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/groups/{id}/students/{student_id}
pub async fn remove_student(
    State(state): State<AppState>,
    Path((id, student_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    require_group(&state, id).await?;
    if GroupRepo::remove_student(&state.pool, id, student_id).await? {
        tracing::info!(group_id = id, student_id, "Student removed from group");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Group member",
            id: student_id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Subjects
// ---------------------------------------------------------------------------

/// PUT /api/v1/groups/{id}/subjects/{subject_id}
pub async fn add_subject(
    State(state): State<AppState>,
    Path((id, subject_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    require_group(&state, id).await?;
    SubjectRepo::find_by_id(&state.pool, subject_id)
        .await?
        .ok_or_else(|| not_found("Subject", subject_id))?;

    if GroupRepo::add_subject(&state.pool, id, subject_id).await? {
        tracing::info!(group_id = id, subject_id, "Subject added to group");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/groups/{id}/subjects/{subject_id}
pub async fn remove_subject(
    State(state): State<AppState>,
    Path((id, subject_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    require_group(&state, id).await?;
    if GroupRepo::remove_subject(&state.pool, id, subject_id).await? {
        tracing::info!(group_id = id, subject_id, "Subject removed from group");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Subject", subject_id))
    }
}
