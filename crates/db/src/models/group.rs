//! Group entity model and DTOs.

use academy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::person::Person;
use crate::models::subject::Subject;

/// A row from the `groups` table. Students and subjects live in the
/// `group_students` and `group_subjects` join tables.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Group {
    pub id: DbId,
    pub title: String,
    pub teacher_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A group together with its teacher, students and subjects.
#[derive(Debug, Clone, Serialize)]
pub struct GroupDetail {
    #[serde(flatten)]
    pub group: Group,
    pub teacher: Option<Person>,
    pub students: Vec<Person>,
    pub subjects: Vec<Subject>,
}

/// DTO for creating a group, optionally with a teacher and initial students.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroup {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[serde(default)]
    pub teacher_id: Option<DbId>,
    #[serde(default)]
    pub student_ids: Vec<DbId>,
}

/// DTO for updating a group.
///
/// `teacher_id` reassigns the teacher; `clear_teacher = true` removes it.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateGroup {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    pub teacher_id: Option<DbId>,
    #[serde(default)]
    pub clear_teacher: bool,
}
