//! Person entity model, DTOs and the role-guard outcome.

use academy_core::error::CoreError;
use academy_core::roles::{role_mismatch, Role};
use academy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `persons` table: an admin, teacher or student.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub credential_id: Option<DbId>,
    pub name: String,
    pub surname: String,
    pub age: Option<i32>,
    /// One of `admin`, `teacher`, `student`.
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a person.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePerson {
    #[serde(default)]
    pub credential_id: Option<DbId>,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub surname: String,
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i32>,
    pub role: Role,
}

/// DTO for updating a person. All fields are optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePerson {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub surname: Option<String>,
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i32>,
    pub role: Option<Role>,
}

/// Why a role-guarded write was refused.
///
/// Returned by repository methods that must verify a person's role inside
/// the same transaction as the write; the transaction is rolled back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleViolation {
    /// No person with this id exists.
    Missing { person_id: DbId },
    /// The person exists but holds a different role.
    WrongRole {
        person_id: DbId,
        actual: String,
        expected: Role,
    },
}

impl From<RoleViolation> for CoreError {
    fn from(v: RoleViolation) -> Self {
        match v {
            RoleViolation::Missing { person_id } => CoreError::NotFound {
                entity: "Person",
                id: person_id,
            },
            RoleViolation::WrongRole {
                person_id,
                actual,
                expected,
            } => role_mismatch(person_id, &actual, expected),
        }
    }
}
