//! Repository for the `salaries` table.

use academy_core::roles::Role;
use academy_core::types::DbId;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::person::RoleViolation;
use crate::models::salary::{CreateSalary, Salary, UpdateSalary};
use crate::repositories::PersonRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, teacher_id, amount, paid_on, created_at, updated_at";

/// Provides CRUD operations for salary payments.
pub struct SalaryRepo;

impl SalaryRepo {
    /// Record a salary payment for a teacher.
    ///
    /// Runs in a transaction: the person row is locked and its role checked
    /// before the insert. Returns `Err(RoleViolation)` (nothing written) if
    /// the person does not exist or is not a teacher.
    pub async fn create_for_teacher(
        pool: &PgPool,
        teacher_id: DbId,
        input: &CreateSalary,
    ) -> Result<Result<Salary, RoleViolation>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let guard = PersonRepo::lock_with_role(&mut *tx, teacher_id, Role::Teacher).await?;
        if let Err(violation) = guard {
            return Ok(Err(violation));
        }

        let query = format!(
            "INSERT INTO salaries (teacher_id, amount, paid_on)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let salary = sqlx::query_as::<_, Salary>(&query)
            .bind(teacher_id)
            .bind(input.amount)
            .bind(input.paid_on)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Ok(salary))
    }

    /// Find a salary payment by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Salary>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM salaries WHERE id = $1");
        sqlx::query_as::<_, Salary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a teacher's payments, newest first.
    pub async fn list_by_teacher(
        pool: &PgPool,
        teacher_id: DbId,
    ) -> Result<Vec<Salary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM salaries
             WHERE teacher_id = $1
             ORDER BY paid_on DESC, id DESC"
        );
        sqlx::query_as::<_, Salary>(&query)
            .bind(teacher_id)
            .fetch_all(pool)
            .await
    }

    /// List all payments made on `paid_on`.
    pub async fn list_by_date(
        pool: &PgPool,
        paid_on: NaiveDate,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Salary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM salaries
             WHERE paid_on = $1
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Salary>(&query)
            .bind(paid_on)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List all payments, newest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Salary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM salaries
             ORDER BY paid_on DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Salary>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a payment. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSalary,
    ) -> Result<Option<Salary>, sqlx::Error> {
        let query = format!(
            "UPDATE salaries SET
                amount = COALESCE($2, amount),
                paid_on = COALESCE($3, paid_on)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Salary>(&query)
            .bind(id)
            .bind(input.amount)
            .bind(input.paid_on)
            .fetch_optional(pool)
            .await
    }

    /// Delete a payment by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM salaries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
