//! Credential entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use academy_core::types::{DbId, Timestamp};

/// Full row from the `credentials` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`CredentialResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Credential {
    pub id: DbId,
    pub login: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe credential representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct CredentialResponse {
    pub id: DbId,
    pub login: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Credential> for CredentialResponse {
    fn from(c: Credential) -> Self {
        Self {
            id: c.id,
            login: c.login,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// DTO for inserting a credential. The password is already hashed.
#[derive(Debug)]
pub struct CreateCredential {
    pub login: String,
    pub password_hash: String,
}

/// DTO for patching a credential. `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct UpdateCredential {
    pub login: Option<String>,
    pub password_hash: Option<String>,
}
