//! Repository for the `persons` table.

use academy_core::roles::Role;
use academy_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::credential::{CreateCredential, Credential};
use crate::models::person::{CreatePerson, Person, RoleViolation, UpdatePerson};
use crate::repositories::CredentialRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, credential_id, name, surname, age, role, created_at, updated_at";

/// Provides CRUD operations for persons.
pub struct PersonRepo;

impl PersonRepo {
    /// Insert a new person, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePerson) -> Result<Person, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::create_in(&mut *conn, input).await
    }

    async fn create_in(
        conn: &mut PgConnection,
        input: &CreatePerson,
    ) -> Result<Person, sqlx::Error> {
        let query = format!(
            "INSERT INTO persons (credential_id, name, surname, age, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(input.credential_id)
            .bind(&input.name)
            .bind(&input.surname)
            .bind(input.age)
            .bind(input.role.as_str())
            .fetch_one(&mut *conn)
            .await
    }

    /// Create a credential and the person it belongs to in one transaction.
    ///
    /// `person.credential_id` is ignored and replaced with the new
    /// credential's ID. Returns `None` (nothing written) if the login is taken.
    pub async fn create_with_credential(
        pool: &PgPool,
        credential: &CreateCredential,
        person: &CreatePerson,
    ) -> Result<Option<(Credential, Person)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(credential) = CredentialRepo::create_in(&mut *tx, credential).await? else {
            return Ok(None);
        };

        let input = CreatePerson {
            credential_id: Some(credential.id),
            ..person.clone()
        };
        let person = Self::create_in(&mut *tx, &input).await?;

        tx.commit().await?;
        Ok(Some((credential, person)))
    }

    /// Find a person by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM persons WHERE id = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the person owning a credential.
    pub async fn find_by_credential_id(
        pool: &PgPool,
        credential_id: DbId,
    ) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM persons WHERE credential_id = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(credential_id)
            .fetch_optional(pool)
            .await
    }

    /// List persons ordered by surname then name, optionally filtered by role.
    pub async fn list(
        pool: &PgPool,
        role: Option<Role>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Person>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM persons
             WHERE ($1::TEXT IS NULL OR role = $1)
             ORDER BY surname, name, id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(role.map(Role::as_str))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a person. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePerson,
    ) -> Result<Option<Person>, sqlx::Error> {
        let query = format!(
            "UPDATE persons SET
                name = COALESCE($2, name),
                surname = COALESCE($3, surname),
                age = COALESCE($4, age),
                role = COALESCE($5, role)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.surname)
            .bind(input.age)
            .bind(input.role.map(Role::as_str))
            .fetch_optional(pool)
            .await
    }

    /// Delete a person by ID. Returns `true` if a row was removed.
    ///
    /// Salaries and group memberships cascade; groups led by the person lose
    /// their teacher.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Lock person `person_id` for the rest of the transaction and check that
    /// it holds the `expected` role.
    ///
    /// The row is taken `FOR SHARE` so the role cannot change (and the row
    /// cannot be deleted) before the caller's write commits.
    pub(crate) async fn lock_with_role(
        conn: &mut PgConnection,
        person_id: DbId,
        expected: Role,
    ) -> Result<Result<(), RoleViolation>, sqlx::Error> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT role FROM persons WHERE id = $1 FOR SHARE")
                .bind(person_id)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(match row {
            None => Err(RoleViolation::Missing { person_id }),
            Some((actual,)) if actual == expected.as_str() => Ok(()),
            Some((actual,)) => {
                tracing::warn!(person_id, %actual, %expected, "Role check failed");
                Err(RoleViolation::WrongRole {
                    person_id,
                    actual,
                    expected,
                })
            }
        })
    }
}
