//! Entity, response, and request types shared by employees and roles.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::types::{DbId, Timestamp};

/// A stored employee or role row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Read-only projection of an [`Entity`] returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityResponse {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Entity> for EntityResponse {
    fn from(entity: Entity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Body of a create call. Names are 2 to 155 characters long.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateRequest {
    #[validate(length(min = 2, max = 155))]
    pub name: String,
}

impl CreateRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A single entity id taken from the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct ParamIdRequest {
    #[validate(range(min = 1))]
    pub id: DbId,
}

impl ParamIdRequest {
    pub fn new(id: DbId) -> Self {
        Self { id }
    }
}

/// A set of entity ids taken from the path or query string.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ParamIdsRequest {
    #[validate(length(min = 1), custom(function = "validate_positive_ids"))]
    pub ids: Vec<DbId>,
}

impl ParamIdsRequest {
    pub fn new(ids: impl Into<Vec<DbId>>) -> Self {
        Self { ids: ids.into() }
    }
}

/// Every id in the set must be strictly positive.
#[allow(clippy::ptr_arg)]
fn validate_positive_ids(ids: &Vec<DbId>) -> Result<(), ValidationError> {
    let invalid: Vec<DbId> = ids.iter().copied().filter(|id| *id <= 0).collect();
    if invalid.is_empty() {
        return Ok(());
    }

    let mut err = ValidationError::new("positive");
    err.message = Some(Cow::Owned(format!(
        "every id must be greater than 0, got {invalid:?}"
    )));
    err.add_param(Cow::Borrowed("invalid"), &invalid);
    Err(err)
}
