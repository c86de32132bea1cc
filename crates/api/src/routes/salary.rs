//! Route definitions for the `/salaries` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::salary;
use crate::state::AppState;

/// Routes mounted at `/salaries`.
///
/// ```text
/// GET    /            -> list (?date=&limit=&offset=)
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update
/// DELETE /{id}        -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(salary::list)).route(
        "/{id}",
        get(salary::get_by_id)
            .put(salary::update)
            .delete(salary::delete),
    )
}
