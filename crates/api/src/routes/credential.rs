//! Route definitions for the `/credentials` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::credential;
use crate::state::AppState;

/// Routes mounted at `/credentials`.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> create
/// POST   /lookup      -> lookup (login + password)
/// POST   /remove      -> remove_by_login (login + password)
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update
/// DELETE /{id}        -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(credential::list).post(credential::create))
        .route("/lookup", post(credential::lookup))
        .route("/remove", post(credential::remove_by_login))
        .route(
            "/{id}",
            get(credential::get_by_id)
                .put(credential::update)
                .delete(credential::delete),
        )
}
