//! Handlers shared by the employee and role collections.
//!
//! Each collection router attaches its [`EntityKind`] as an [`Extension`],
//! and the handlers pick the matching service from [`AppState`]. Extractors
//! are taken as `Result` so their rejections reach the client as envelope
//! 400s.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use idm_core::entity::{CreateRequest, EntityResponse, ParamIdRequest, ParamIdsRequest};
use idm_core::kind::EntityKind;
use idm_core::types::DbId;

use crate::error::AppResult;
use crate::query::{parse_id, parse_ids, IdsParams};
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/{kind}s
///
/// Create an entity. Responds 201 with the generated id.
pub async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<EntityKind>,
    body: Result<Json<CreateRequest>, JsonRejection>,
) -> AppResult<ApiResponse<DbId>> {
    let Json(request) = body?;

    let id = state.service(kind).create(request).await?;

    Ok(ApiResponse::created(id))
}

/// GET /api/v1/{kind}s/{id}
pub async fn find_by_id(
    State(state): State<AppState>,
    Extension(kind): Extension<EntityKind>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<ApiResponse<EntityResponse>> {
    let Path(raw_id) = path?;
    let id = parse_id(&raw_id)?;

    let entity = state
        .service(kind)
        .find_by_id(ParamIdRequest::new(id))
        .await?;

    Ok(ApiResponse::ok(entity))
}

/// GET /api/v1/{kind}s
pub async fn find_all(
    State(state): State<AppState>,
    Extension(kind): Extension<EntityKind>,
) -> AppResult<ApiResponse<Vec<EntityResponse>>> {
    let entities = state.service(kind).find_all().await?;

    Ok(ApiResponse::ok(entities))
}

/// GET /api/v1/{kind}s/list/{ids}
///
/// `ids` is a comma-separated list; unknown ids are left out of the result.
pub async fn filter_by_ids(
    State(state): State<AppState>,
    Extension(kind): Extension<EntityKind>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<ApiResponse<Vec<EntityResponse>>> {
    let Path(raw_ids) = path?;
    let ids = parse_ids(&raw_ids)?;

    let entities = state
        .service(kind)
        .filter_by_ids(ParamIdsRequest::new(ids))
        .await?;

    Ok(ApiResponse::ok(entities))
}

/// DELETE /api/v1/{kind}s/{id}
///
/// Responds with the number of deleted rows (0 when the id is unknown).
pub async fn delete_by_id(
    State(state): State<AppState>,
    Extension(kind): Extension<EntityKind>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<ApiResponse<u64>> {
    let Path(raw_id) = path?;
    let id = parse_id(&raw_id)?;

    let count = state
        .service(kind)
        .delete_by_id(ParamIdRequest::new(id))
        .await?;

    Ok(ApiResponse::ok(count))
}

/// POST /api/v1/{kind}s/delete?ids=1,2,3
pub async fn delete_by_ids(
    State(state): State<AppState>,
    Extension(kind): Extension<EntityKind>,
    query: Result<Query<IdsParams>, QueryRejection>,
) -> AppResult<ApiResponse<u64>> {
    let Query(params) = query?;
    let ids = parse_ids(params.ids.as_deref().unwrap_or_default())?;

    let count = state
        .service(kind)
        .delete_by_ids(ParamIdsRequest::new(ids))
        .await?;

    Ok(ApiResponse::ok(count))
}
