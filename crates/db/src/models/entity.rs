//! Row model shared by the `employee` and `role` tables.

use idm_core::entity::Entity;
use idm_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from either entity table.
#[derive(Debug, Clone, FromRow)]
pub struct EntityRow {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<EntityRow> for Entity {
    fn from(row: EntityRow) -> Self {
        Entity {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
