//! Person roles and the guard that checks a person holds the role an
//! operation requires.
//!
//! Role names must match the `chk_persons_role` constraint in
//! `20260301000002_create_persons_table.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TEACHER: &str = "teacher";
pub const ROLE_STUDENT: &str = "student";

/// The role a person plays in the school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Teacher => ROLE_TEACHER,
            Role::Student => ROLE_STUDENT,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_TEACHER => Ok(Role::Teacher),
            ROLE_STUDENT => Ok(Role::Student),
            other => Err(CoreError::Validation(format!(
                "Unknown role '{other}', expected one of: \
                 {ROLE_ADMIN}, {ROLE_TEACHER}, {ROLE_STUDENT}"
            ))),
        }
    }
}

/// Check that the person `id` (whose stored role is `actual`) has the
/// `expected` role.
///
/// Returns [`CoreError::Validation`] naming both roles on mismatch, so callers
/// can surface a 400 instead of silently skipping the write.
pub fn ensure_role(id: DbId, actual: &str, expected: Role) -> Result<(), CoreError> {
    if actual == expected.as_str() {
        return Ok(());
    }
    Err(role_mismatch(id, actual, expected))
}

/// The error reported when person `id` holds `actual` instead of `expected`.
pub fn role_mismatch(id: DbId, actual: &str, expected: Role) -> CoreError {
    CoreError::Validation(format!("Person {id} is a {actual}, not a {expected}"))
}
