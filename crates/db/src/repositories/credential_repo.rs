//! Repository for the `credentials` table.

use academy_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::credential::{CreateCredential, Credential, UpdateCredential};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, login, password_hash, created_at, updated_at";

/// Provides CRUD operations for credentials.
pub struct CredentialRepo;

impl CredentialRepo {
    /// Insert a credential unless the login is already taken.
    ///
    /// The existence check and the insert share one transaction. Returns
    /// `None` (and rolls back) when the login exists. A concurrent insert of
    /// the same login still fails on `uq_credentials_login`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCredential,
    ) -> Result<Option<Credential>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let created = Self::create_in(&mut *tx, input).await?;
        if created.is_some() {
            tx.commit().await?;
        }
        Ok(created)
    }

    /// Transaction-scoped body of [`CredentialRepo::create`], shared with
    /// person registration.
    pub(crate) async fn create_in(
        conn: &mut PgConnection,
        input: &CreateCredential,
    ) -> Result<Option<Credential>, sqlx::Error> {
        let taken: Option<(DbId,)> = sqlx::query_as("SELECT id FROM credentials WHERE login = $1")
            .bind(&input.login)
            .fetch_optional(&mut *conn)
            .await?;
        if taken.is_some() {
            tracing::debug!(login = %input.login, "Login already taken");
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO credentials (login, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let credential = sqlx::query_as::<_, Credential>(&query)
            .bind(&input.login)
            .bind(&input.password_hash)
            .fetch_one(&mut *conn)
            .await?;
        Ok(Some(credential))
    }

    /// Find a credential by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Credential>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM credentials WHERE id = $1");
        sqlx::query_as::<_, Credential>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a credential by login (case-sensitive).
    pub async fn find_by_login(
        pool: &PgPool,
        login: &str,
    ) -> Result<Option<Credential>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM credentials WHERE login = $1");
        sqlx::query_as::<_, Credential>(&query)
            .bind(login)
            .fetch_optional(pool)
            .await
    }

    /// List credentials ordered by ID.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Credential>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM credentials ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Credential>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a credential. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCredential,
    ) -> Result<Option<Credential>, sqlx::Error> {
        let query = format!(
            "UPDATE credentials SET
                login = COALESCE($2, login),
                password_hash = COALESCE($3, password_hash)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Credential>(&query)
            .bind(id)
            .bind(&input.login)
            .bind(&input.password_hash)
            .fetch_optional(pool)
            .await
    }

    /// Delete a credential by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM credentials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete the credential holding both `login` and `password_hash`.
    ///
    /// Returns `false` if no row matches, including when the login was
    /// renamed or the password rotated after the caller verified it.
    pub async fn delete_by_login_and_hash(
        pool: &PgPool,
        login: &str,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM credentials WHERE login = $1 AND password_hash = $2")
                .bind(login)
                .bind(password_hash)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
