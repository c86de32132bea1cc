//! Salary entity model and DTOs.

use academy_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `salaries` table. Each payment belongs to one teacher.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Salary {
    pub id: DbId,
    pub teacher_id: DbId,
    pub amount: f64,
    pub paid_on: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a salary payment. The teacher comes from the URL path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSalary {
    #[validate(range(min = 0.0))]
    pub amount: f64,
    pub paid_on: NaiveDate,
}

/// DTO for updating a salary payment. All fields are optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSalary {
    #[validate(range(min = 0.0))]
    pub amount: Option<f64>,
    pub paid_on: Option<NaiveDate>,
}
