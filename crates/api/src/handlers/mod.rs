//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input, apply domain rules from `academy_core`, delegate
//! to the corresponding repository in `academy_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod credential;
pub mod group;
pub mod person;
pub mod salary;
pub mod subject;
pub mod teacher;
