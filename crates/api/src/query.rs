//! Path and query parameter parsing shared by the entity handlers.

use idm_core::types::DbId;
use serde::Deserialize;

use crate::error::AppError;

/// Query parameters for bulk delete (`?ids=1,2,3`).
#[derive(Debug, Deserialize)]
pub struct IdsParams {
    pub ids: Option<String>,
}

/// Parse a single id path segment.
pub fn parse_id(raw: &str) -> Result<DbId, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

/// Parse a comma-separated id list. Fails on an empty list or on the
/// first element that is not an integer.
pub fn parse_ids(raw: &str) -> Result<Vec<DbId>, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::BadRequest("ids is required".into()));
    }

    raw.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse()
                .map_err(|_| AppError::BadRequest(format!("invalid id: {part}")))
        })
        .collect()
}
