//! Storage port for entity tables.
//!
//! The service only sees this trait; the PostgreSQL adapter lives in
//! `idm-db`. Each store instance is bound to a single [`EntityKind`].

use async_trait::async_trait;

use crate::entity::{CreateRequest, Entity};
use crate::kind::EntityKind;
use crate::types::DbId;

/// Opaque infrastructure failure raised by a storage adapter.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct StorageError(#[source] Box<dyn std::error::Error + Send + Sync + 'static>);

impl StorageError {
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self(err.into())
    }
}

/// Row-level operations and transaction control for one entity table.
///
/// `exists_by_name_tx` and `insert_tx` must run on the connection owned by
/// the given transaction so the duplicate check and the insert commit or
/// roll back together. `commit` and `rollback` consume the handle.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Open unit of work. Dropping it without finalizing must roll back.
    type Tx: Send;

    fn kind(&self) -> EntityKind;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Entity>, StorageError>;

    /// All rows ordered by id ascending.
    async fn find_all(&self) -> Result<Vec<Entity>, StorageError>;

    /// Rows whose id is in `ids`. Ids without a row are skipped.
    async fn filter_by_ids(&self, ids: &[DbId]) -> Result<Vec<Entity>, StorageError>;

    /// Number of rows removed (0 or 1).
    async fn delete_by_id(&self, id: DbId) -> Result<u64, StorageError>;

    async fn delete_by_ids(&self, ids: &[DbId]) -> Result<u64, StorageError>;

    async fn begin(&self) -> Result<Self::Tx, StorageError>;

    async fn exists_by_name_tx(&self, tx: &mut Self::Tx, name: &str) -> Result<bool, StorageError>;

    /// Insert a row and return its generated id.
    async fn insert_tx(
        &self,
        tx: &mut Self::Tx,
        request: &CreateRequest,
    ) -> Result<DbId, StorageError>;

    async fn commit(&self, tx: Self::Tx) -> Result<(), StorageError>;

    async fn rollback(&self, tx: Self::Tx) -> Result<(), StorageError>;
}
