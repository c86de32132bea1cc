//! Handlers for the `/persons` resource.

use academy_core::error::CoreError;
use academy_core::naming::{validate_display_name, validate_login};
use academy_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use academy_core::roles::{ensure_role, Role};
use academy_core::types::DbId;
use academy_db::models::credential::{CreateCredential, CredentialResponse};
use academy_db::models::person::{CreatePerson, Person, UpdatePerson};
use academy_db::repositories::PersonRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::hash_new_password;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /persons`.
#[derive(Debug, Deserialize)]
pub struct PersonListParams {
    pub role: Option<Role>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /persons/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64))]
    pub login: String,
    #[validate(length(min = 1, max = 256))]
    pub password: String,
    #[validate(nested)]
    pub person: CreatePerson,
}

/// A newly registered person with their credential.
#[derive(Debug, Serialize)]
pub struct Registration {
    pub credential: CredentialResponse,
    pub person: Person,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Person",
        id,
    })
}

/// Load person `id` and check it holds `role`.
///
/// 404 if the person does not exist, 400 if the role differs.
pub(crate) async fn require_role(state: &AppState, id: DbId, role: Role) -> AppResult<Person> {
    let person = PersonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_role(person.id, &person.role, role)?;
    Ok(person)
}

fn validate_names(name: Option<&str>, surname: Option<&str>) -> Result<(), CoreError> {
    if let Some(name) = name {
        validate_display_name("Name", name)?;
    }
    if let Some(surname) = surname {
        validate_display_name("Surname", surname)?;
    }
    Ok(())
}

/// POST /api/v1/persons
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePerson>,
) -> AppResult<(StatusCode, Json<DataResponse<Person>>)> {
    input.validate()?;
    validate_names(Some(&input.name), Some(&input.surname))?;

    let person = PersonRepo::create(&state.pool, &input).await?;
    tracing::info!(person_id = person.id, role = %person.role, "Person created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: person })))
}

/// POST /api/v1/persons/register
///
/// Creates a credential and its person atomically.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Registration>>)> {
    input.validate()?;
    validate_login(&input.login)?;
    validate_names(Some(&input.person.name), Some(&input.person.surname))?;
    let password_hash = hash_new_password(&input.password, state.config.password_min_length)?;

    let credential = CreateCredential {
        login: input.login.clone(),
        password_hash,
    };
    let (credential, person) =
        PersonRepo::create_with_credential(&state.pool, &credential, &input.person)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Conflict(format!(
                    "Login '{}' is already taken",
                    input.login
                )))
            })?;

    tracing::info!(
        person_id = person.id,
        credential_id = credential.id,
        role = %person.role,
        "Person registered"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: Registration {
                credential: credential.into(),
                person,
            },
        }),
    ))
}

/// GET /api/v1/persons
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PersonListParams>,
) -> AppResult<Json<DataResponse<Vec<Person>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let persons = PersonRepo::list(&state.pool, params.role, limit, offset).await?;
    Ok(Json(DataResponse { data: persons }))
}

/// GET /api/v1/persons/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Person>>> {
    let person = PersonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: person }))
}

/// PUT /api/v1/persons/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePerson>,
) -> AppResult<Json<DataResponse<Person>>> {
    input.validate()?;
    validate_names(input.name.as_deref(), input.surname.as_deref())?;

    let person = PersonRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(person_id = id, "Person updated");
    Ok(Json(DataResponse { data: person }))
}

/// DELETE /api/v1/persons/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PersonRepo::delete(&state.pool, id).await? {
        tracing::info!(person_id = id, "Person deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
