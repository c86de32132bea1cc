//! Subject entity model and DTOs.

use academy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `subjects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Subject {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubject {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSubject {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
}
