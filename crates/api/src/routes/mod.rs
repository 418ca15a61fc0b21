pub mod entity;
pub mod health;

use axum::Router;
use idm_core::kind::EntityKind;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /employees                  list, create
/// /employees/{id}             get, delete
/// /employees/list/{ids}       filter by comma-separated ids
/// /employees/delete?ids=      bulk delete (POST)
///
/// /roles                      (same shape as /employees)
/// ```
pub fn api_routes() -> Router<AppState> {
    EntityKind::ALL
        .into_iter()
        .fold(Router::new(), |router, kind| {
            router.nest(&format!("/{}", kind.collection()), entity::router(kind))
        })
}
