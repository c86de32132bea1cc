//! Handlers for the `/subjects` resource.

use academy_core::error::CoreError;
use academy_core::naming::validate_display_name;
use academy_core::types::DbId;
use academy_db::models::subject::{CreateSubject, Subject, UpdateSubject};
use academy_db::repositories::SubjectRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Subject",
        id,
    })
}

/// POST /api/v1/subjects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSubject>,
) -> AppResult<(StatusCode, Json<DataResponse<Subject>>)> {
    input.validate()?;
    validate_display_name("Subject name", &input.name)?;

    let subject = SubjectRepo::create(&state.pool, &input).await?;
    tracing::info!(subject_id = subject.id, name = %subject.name, "Subject created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: subject })))
}

/// GET /api/v1/subjects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Subject>>>> {
    let subjects = SubjectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: subjects }))
}

/// GET /api/v1/subjects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Subject>>> {
    let subject = SubjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: subject }))
}

/// PUT /api/v1/subjects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubject>,
) -> AppResult<Json<DataResponse<Subject>>> {
    input.validate()?;
    if let Some(name) = &input.name {
        validate_display_name("Subject name", name)?;
    }

    let subject = SubjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: subject }))
}

/// DELETE /api/v1/subjects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if SubjectRepo::delete(&state.pool, id).await? {
        tracing::info!(subject_id = id, "Subject deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
