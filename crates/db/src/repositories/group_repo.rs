//! Repository for the `groups` table and its `group_students` /
//! `group_subjects` join tables.

use academy_core::roles::Role;
use academy_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::group::{CreateGroup, Group, UpdateGroup};
use crate::models::person::{Person, RoleViolation};
use crate::models::subject::Subject;
use crate::repositories::PersonRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, teacher_id, created_at, updated_at";

/// Person columns qualified for joins against `group_students`.
const PERSON_COLUMNS: &str = "p.id, p.credential_id, p.name, p.surname, p.age, p.role, \
                              p.created_at, p.updated_at";

/// Provides CRUD and membership operations for groups.
pub struct GroupRepo;

impl GroupRepo {
    /// Create a group with an optional teacher and initial students.
    ///
    /// Runs in a transaction: the teacher must be a `teacher` and every
    /// student a `student`. The first violation rolls back the whole group,
    /// so a group is never created with only part of its roster.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGroup,
    ) -> Result<Result<Group, RoleViolation>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if let Some(teacher_id) = input.teacher_id {
            let guard = PersonRepo::lock_with_role(&mut *tx, teacher_id, Role::Teacher).await?;
            if let Err(v) = guard {
                return Ok(Err(v));
            }
        }

        let query = format!(
            "INSERT INTO groups (title, teacher_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let group = sqlx::query_as::<_, Group>(&query)
            .bind(&input.title)
            .bind(input.teacher_id)
            .fetch_one(&mut *tx)
            .await?;

        for &student_id in &input.student_ids {
            if let Err(v) = Self::add_student_in(&mut *tx, group.id, student_id).await? {
                return Ok(Err(v));
            }
        }

        tx.commit().await?;
        Ok(Ok(group))
    }

    /// Find a group by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Group>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM groups WHERE id = $1");
        sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the groups led by a teacher, oldest first.
    pub async fn find_by_teacher(
        pool: &PgPool,
        teacher_id: DbId,
    ) -> Result<Vec<Group>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM groups WHERE teacher_id = $1 ORDER BY id");
        sqlx::query_as::<_, Group>(&query)
            .bind(teacher_id)
            .fetch_all(pool)
            .await
    }

    /// List all groups by title.
    pub async fn list(pool: &PgPool) -> Result<Vec<Group>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM groups ORDER BY title");
        sqlx::query_as::<_, Group>(&query).fetch_all(pool).await
    }

    /// Update a group's title and/or teacher.
    ///
    /// A new teacher is role-checked in the same transaction as the update.
    /// `clear_teacher` takes precedence over `teacher_id`. Returns `Ok(None)`
    /// if no group with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGroup,
    ) -> Result<Result<Option<Group>, RoleViolation>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if let (Some(teacher_id), false) = (input.teacher_id, input.clear_teacher) {
            let guard = PersonRepo::lock_with_role(&mut *tx, teacher_id, Role::Teacher).await?;
            if let Err(v) = guard {
                return Ok(Err(v));
            }
        }

        let query = format!(
            "UPDATE groups SET
                title = COALESCE($2, title),
                teacher_id = CASE WHEN $4 THEN NULL ELSE COALESCE($3, teacher_id) END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let group = sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.teacher_id)
            .bind(input.clear_teacher)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Ok(group))
    }

    /// Delete a group by ID. Memberships cascade. Returns `true` if removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Students
    // -----------------------------------------------------------------------

    /// Add a student to a group.
    ///
    /// Returns `Ok(true)` if the membership was created, `Ok(false)` if the
    /// student was already in the group.
    pub async fn add_student(
        pool: &PgPool,
        group_id: DbId,
        student_id: DbId,
    ) -> Result<Result<bool, RoleViolation>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let added = Self::add_student_in(&mut *tx, group_id, student_id).await?;
        if added.is_ok() {
            tx.commit().await?;
        }
        Ok(added)
    }

    async fn add_student_in(
        conn: &mut PgConnection,
        group_id: DbId,
        student_id: DbId,
    ) -> Result<Result<bool, RoleViolation>, sqlx::Error> {
        let guard = PersonRepo::lock_with_role(&mut *conn, student_id, Role::Student).await?;
        if let Err(v) = guard {
            return Ok(Err(v));
        }

        let result = sqlx::query(
            "INSERT INTO group_students (group_id, student_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(group_id)
        .bind(student_id)
        .execute(&mut *conn)
        .await?;
        Ok(Ok(result.rows_affected() > 0))
    }

    /// Remove a student from a group. Returns `true` if a membership existed.
    pub async fn remove_student(
        pool: &PgPool,
        group_id: DbId,
        student_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM group_students WHERE group_id = $1 AND student_id = $2")
                .bind(group_id)
                .bind(student_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the students of a group ordered by surname, then name.
    pub async fn list_students(pool: &PgPool, group_id: DbId) -> Result<Vec<Person>, sqlx::Error> {
        let query = format!(
            "SELECT {PERSON_COLUMNS}
             FROM persons p
             JOIN group_students gs ON gs.student_id = p.id
             WHERE gs.group_id = $1
             ORDER BY p.surname, p.name, p.id"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(group_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Subjects
    // -----------------------------------------------------------------------

    /// Attach a subject to a group's curriculum.
    ///
    /// Returns `true` if the link was created, `false` if it already existed.
    /// Unknown group or subject IDs fail with a foreign-key violation.
    pub async fn add_subject(
        pool: &PgPool,
        group_id: DbId,
        subject_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO group_subjects (group_id, subject_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(group_id)
        .bind(subject_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Detach a subject from a group. Returns `true` if a link existed.
    pub async fn remove_subject(
        pool: &PgPool,
        group_id: DbId,
        subject_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM group_subjects WHERE group_id = $1 AND subject_id = $2")
                .bind(group_id)
                .bind(subject_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the subjects taught to a group, alphabetically.
    pub async fn list_subjects(pool: &PgPool, group_id: DbId) -> Result<Vec<Subject>, sqlx::Error> {
        sqlx::query_as::<_, Subject>(
            "SELECT s.id, s.name, s.created_at, s.updated_at
             FROM subjects s
             JOIN group_subjects gs ON gs.subject_id = s.id
             WHERE gs.group_id = $1
             ORDER BY s.name",
        )
        .bind(group_id)
        .fetch_all(pool)
        .await
    }
}
