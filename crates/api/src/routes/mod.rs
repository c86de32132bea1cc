pub mod credential;
pub mod group;
pub mod health;
pub mod person;
pub mod salary;
pub mod subject;
pub mod teacher;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /credentials                         list, create
/// /credentials/lookup                  resolve login + password
/// /credentials/remove                  delete by login + password
/// /credentials/{id}                    get, update, delete
///
/// /persons                             list (?role=), create
/// /persons/register                    credential + person in one step
/// /persons/{id}                        get, update, delete
///
/// /teachers/{id}/salaries              list, record payment
/// /teachers/{id}/salaries/average      average of recent payments
/// /teachers/{id}/students              students of the teacher's group
///
/// /salaries                            list (?date=)
/// /salaries/{id}                       get, update, delete
///
/// /subjects                            list, create
/// /subjects/{id}                       get, update, delete
///
/// /groups                              list, create
/// /groups/{id}                         get, update, delete
/// /groups/{id}/students                list
/// /groups/{id}/students/{student_id}   add, remove
/// /groups/{id}/subjects/{subject_id}   add, remove
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/credentials", credential::router())
        .nest("/persons", person::router())
        .nest("/teachers", teacher::router())
        .nest("/salaries", salary::router())
        .nest("/subjects", subject::router())
        .nest("/groups", group::router())
}
