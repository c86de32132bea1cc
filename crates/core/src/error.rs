//! Domain errors shared by the persistence and HTTP layers.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No row of `entity` with this id.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Input breaks a domain rule, including a person holding the wrong role.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The write collides with existing data, e.g. a taken login.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A login + password pair did not match.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
