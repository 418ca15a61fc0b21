//! Route definitions for one entity collection.

use axum::routing::{get, post};
use axum::{Extension, Router};
use idm_core::kind::EntityKind;

use crate::handlers::{entity, fallback};
use crate::state::AppState;

/// Collection routes, mounted at `/{kind}s`.
///
/// ```text
/// GET    /              -> find_all
/// POST   /              -> create
/// GET    /{id}          -> find_by_id
/// DELETE /{id}          -> delete_by_id
/// GET    /list/{ids}    -> filter_by_ids
/// POST   /delete        -> delete_by_ids
/// ```
///
/// Any other method on these paths gets a `405` envelope.
pub fn router(kind: EntityKind) -> Router<AppState> {
    Router::new()
        .route("/", get(entity::find_all).post(entity::create))
        .route("/{id}", get(entity::find_by_id).delete(entity::delete_by_id))
        .route("/list/{ids}", get(entity::filter_by_ids))
        .route("/delete", post(entity::delete_by_ids))
        .method_not_allowed_fallback(fallback::method_not_allowed)
        .layer(Extension(kind))
}
