//! Handlers for the `/credentials` resource.
//!
//! Plaintext passwords only exist inside request bodies; they are hashed
//! with Argon2id before reaching the repository and never returned.

use academy_core::error::CoreError;
use academy_core::naming::validate_login;
use academy_core::types::DbId;
use academy_db::models::credential::{
    CreateCredential, Credential, CredentialResponse, UpdateCredential,
};
use academy_db::models::person::Person;
use academy_db::repositories::{CredentialRepo, PersonRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::{hash_new_password, password_matches};
use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Login + plaintext password for a new credential.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialRequest {
    #[validate(length(min = 3, max = 64))]
    pub login: String,
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

/// Login + plaintext password presented for lookup or removal.
///
/// Not validated: any malformed pair is simply an unknown login and gets
/// the same 401 as a wrong password.
#[derive(Debug, Deserialize)]
pub struct LoginAttempt {
    pub login: String,
    pub password: String,
}

/// Request body for `PUT /credentials/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCredentialRequest {
    #[validate(length(min = 3, max = 64))]
    pub login: Option<String>,
    #[validate(length(min = 1, max = 256))]
    pub password: Option<String>,
}

/// A matched credential and the person it belongs to, if any.
#[derive(Debug, Serialize)]
pub struct CredentialLookup {
    pub credential: CredentialResponse,
    pub person: Option<Person>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Credential",
        id,
    })
}

fn invalid_login() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid login or password".into()))
}

fn login_taken(login: &str) -> AppError {
    AppError::Core(CoreError::Conflict(format!("Login '{login}' is already taken")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/credentials
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CredentialRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CredentialResponse>>)> {
    input.validate()?;
    validate_login(&input.login)?;
    let password_hash = hash_new_password(&input.password, state.config.password_min_length)?;

    let credential = CredentialRepo::create(
        &state.pool,
        &CreateCredential {
            login: input.login.clone(),
            password_hash,
        },
    )
    .await?
    .ok_or_else(|| login_taken(&input.login))?;

    tracing::info!(credential_id = credential.id, login = %credential.login, "Credential created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: credential.into(),
        }),
    ))
}

/// GET /api/v1/credentials
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<CredentialResponse>>>> {
    let (limit, offset) = params.resolve();
    let credentials = CredentialRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse {
        data: credentials.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/v1/credentials/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CredentialResponse>>> {
    let credential = CredentialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse {
        data: credential.into(),
    }))
}

/// PUT /api/v1/credentials/{id}
///
/// Changes the login and/or password. A new password is re-hashed.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCredentialRequest>,
) -> AppResult<Json<DataResponse<CredentialResponse>>> {
    input.validate()?;
    if let Some(login) = &input.login {
        validate_login(login)?;
    }
    let password_hash = input
        .password
        .as_deref()
        .map(|p| hash_new_password(p, state.config.password_min_length))
        .transpose()?;

    let credential = CredentialRepo::update(
        &state.pool,
        id,
        &UpdateCredential {
            login: input.login,
            password_hash,
        },
    )
    .await?
    .ok_or_else(|| not_found(id))?;

    tracing::info!(credential_id = id, "Credential updated");
    Ok(Json(DataResponse {
        data: credential.into(),
    }))
}

/// DELETE /api/v1/credentials/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CredentialRepo::delete(&state.pool, id).await? {
        tracing::info!(credential_id = id, "Credential deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/credentials/lookup
///
/// Resolve a login + password pair to its credential and owning person.
/// Unknown logins and wrong passwords produce the same 401.
pub async fn lookup(
    State(state): State<AppState>,
    Json(input): Json<LoginAttempt>,
) -> AppResult<Json<DataResponse<CredentialLookup>>> {
    let credential = verify_login(&state, &input).await?;
    let person = PersonRepo::find_by_credential_id(&state.pool, credential.id).await?;
    Ok(Json(DataResponse {
        data: CredentialLookup {
            credential: credential.into(),
            person,
        },
    }))
}

/// POST /api/v1/credentials/remove
///
/// Delete the credential matching a login + password pair. The delete is
/// conditioned on the verified login and hash, so a credential renamed or
/// re-keyed after verification is left alone and the request gets a 401.
pub async fn remove_by_login(
    State(state): State<AppState>,
    Json(input): Json<LoginAttempt>,
) -> AppResult<StatusCode> {
    let credential = verify_login(&state, &input).await?;

    if CredentialRepo::delete_by_login_and_hash(
        &state.pool,
        &credential.login,
        &credential.password_hash,
    )
    .await?
    {
        tracing::info!(credential_id = credential.id, "Credential deleted by login");
        Ok(StatusCode::NO_CONTENT)
    } else {
        tracing::debug!(credential_id = credential.id, "Credential changed before removal");
        Err(invalid_login())
    }
}

/// Find the credential for `input.login` and check its password.
async fn verify_login(state: &AppState, input: &LoginAttempt) -> AppResult<Credential> {
    let credential = CredentialRepo::find_by_login(&state.pool, &input.login)
        .await?
        .ok_or_else(invalid_login)?;

    if !password_matches(&input.password, &credential.password_hash)? {
        tracing::debug!(login = %input.login, "Password mismatch");
        return Err(invalid_login());
    }
    Ok(credential)
}
