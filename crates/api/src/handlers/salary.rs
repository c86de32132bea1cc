//! Handlers for salary payments.
//!
//! Payments are created and listed per teacher
//! (`/teachers/{teacher_id}/salaries`) and read, updated or deleted by ID
//! (`/salaries/{id}`).

use academy_core::error::CoreError;
use academy_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use academy_core::roles::Role;
use academy_core::salary::{average_salary, validate_amount};
use academy_core::types::DbId;
use academy_db::models::salary::{CreateSalary, Salary, UpdateSalary};
use academy_db::repositories::SalaryRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::person::require_role;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /salaries`.
#[derive(Debug, Deserialize)]
pub struct SalaryListParams {
    /// Only payments made on this date (`YYYY-MM-DD`).
    pub date: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for the average endpoint.
#[derive(Debug, Deserialize)]
pub struct AverageParams {
    pub months: Option<u32>,
}

/// Average of a teacher's most recent payments.
#[derive(Debug, Serialize)]
pub struct SalaryAverage {
    pub teacher_id: DbId,
    pub months: u32,
    /// `null` when the teacher has never been paid.
    pub average: Option<f64>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Salary",
        id,
    })
}

/// POST /api/v1/teachers/{teacher_id}/salaries
pub async fn create_for_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<DbId>,
    Json(input): Json<CreateSalary>,
) -> AppResult<(StatusCode, Json<DataResponse<Salary>>)> {
    input.validate()?;
    validate_amount(input.amount)?;

    let salary = SalaryRepo::create_for_teacher(&state.pool, teacher_id, &input).await??;
    tracing::info!(salary_id = salary.id, teacher_id, amount = salary.amount, "Salary recorded");
    Ok((StatusCode::CREATED, Json(DataResponse { data: salary })))
}

/// GET /api/v1/teachers/{teacher_id}/salaries
pub async fn list_by_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Salary>>>> {
    require_role(&state, teacher_id, Role::Teacher).await?;
    let salaries = SalaryRepo::list_by_teacher(&state.pool, teacher_id).await?;
    Ok(Json(DataResponse { data: salaries }))
}

/// GET /api/v1/teachers/{teacher_id}/salaries/average?months=N
///
/// `months` defaults to 1 (the latest payment).
pub async fn average_for_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<DbId>,
    Query(params): Query<AverageParams>,
) -> AppResult<Json<DataResponse<SalaryAverage>>> {
    let months = params.months.unwrap_or(1);
    require_role(&state, teacher_id, Role::Teacher).await?;

    let payments: Vec<(NaiveDate, f64)> = SalaryRepo::list_by_teacher(&state.pool, teacher_id)
        .await?
        .into_iter()
        .map(|s| (s.paid_on, s.amount))
        .collect();
    let average = average_salary(&payments, months)?;

    Ok(Json(DataResponse {
        data: SalaryAverage {
            teacher_id,
            months,
            average,
        },
    }))
}

/// GET /api/v1/salaries
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SalaryListParams>,
) -> AppResult<Json<DataResponse<Vec<Salary>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let salaries = match params.date {
        Some(date) => SalaryRepo::list_by_date(&state.pool, date, limit, offset).await?,
        None => SalaryRepo::list(&state.pool, limit, offset).await?,
    };
    Ok(Json(DataResponse { data: salaries }))
}

/// GET /api/v1/salaries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Salary>>> {
    let salary = SalaryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: salary }))
}

/// PUT /api/v1/salaries/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSalary>,
) -> AppResult<Json<DataResponse<Salary>>> {
    input.validate()?;
    if let Some(amount) = input.amount {
        validate_amount(amount)?;
    }

    let salary = SalaryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(salary_id = id, "Salary updated");
    Ok(Json(DataResponse { data: salary }))
}

/// DELETE /api/v1/salaries/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if SalaryRepo::delete(&state.pool, id).await? {
        tracing::info!(salary_id = id, "Salary deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
