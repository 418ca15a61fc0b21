//! Repository for the `employee` and `role` tables.

use async_trait::async_trait;
use idm_core::entity::{CreateRequest, Entity};
use idm_core::kind::EntityKind;
use idm_core::storage::{EntityStore, StorageError};
use idm_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::entity::EntityRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// PostgreSQL store bound to one entity table.
///
/// Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct EntityRepo {
    pool: PgPool,
    kind: EntityKind,
}

impl EntityRepo {
    pub fn new(pool: PgPool, kind: EntityKind) -> Self {
        Self { pool, kind }
    }

    fn table(&self) -> &'static str {
        self.kind.table()
    }
}

#[async_trait]
impl EntityStore for EntityRepo {
    type Tx = Transaction<'static, Postgres>;

    fn kind(&self) -> EntityKind {
        self.kind
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Entity>, StorageError> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", self.table());
        let row = sqlx::query_as::<_, EntityRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::new)?;
        Ok(row.map(Entity::from))
    }

    async fn find_all(&self) -> Result<Vec<Entity>, StorageError> {
        let query = format!("SELECT {COLUMNS} FROM {} ORDER BY id ASC", self.table());
        let rows = sqlx::query_as::<_, EntityRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::new)?;
        Ok(rows.into_iter().map(Entity::from).collect())
    }

    async fn filter_by_ids(&self, ids: &[DbId]) -> Result<Vec<Entity>, StorageError> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE id = ANY($1) ORDER BY id ASC",
            self.table()
        );
        let rows = sqlx::query_as::<_, EntityRow>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::new)?;
        Ok(rows.into_iter().map(Entity::from).collect())
    }

    async fn delete_by_id(&self, id: DbId) -> Result<u64, StorageError> {
        let query = format!("DELETE FROM {} WHERE id = $1", self.table());
        let result = sqlx::query(&query)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::new)?;
        Ok(result.rows_affected())
    }

    async fn delete_by_ids(&self, ids: &[DbId]) -> Result<u64, StorageError> {
        let query = format!("DELETE FROM {} WHERE id = ANY($1)", self.table());
        let result = sqlx::query(&query)
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(StorageError::new)?;
        Ok(result.rows_affected())
    }

    async fn begin(&self) -> Result<Self::Tx, StorageError> {
        self.pool.begin().await.map_err(StorageError::new)
    }

    async fn exists_by_name_tx(&self, tx: &mut Self::Tx, name: &str) -> Result<bool, StorageError> {
        let query = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE name = $1)",
            self.table()
        );
        sqlx::query_scalar::<_, bool>(&query)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
            .map_err(StorageError::new)
    }

    async fn insert_tx(
        &self,
        tx: &mut Self::Tx,
        request: &CreateRequest,
    ) -> Result<DbId, StorageError> {
        let query = format!("INSERT INTO {} (name) VALUES ($1) RETURNING id", self.table());
        let id = sqlx::query_scalar::<_, DbId>(&query)
            .bind(&request.name)
            .fetch_one(&mut **tx)
            .await
            .map_err(StorageError::new)?;
        tracing::debug!(kind = %self.kind, id, "Row inserted, awaiting commit");
        Ok(id)
    }

    async fn commit(&self, tx: Self::Tx) -> Result<(), StorageError> {
        tx.commit().await.map_err(StorageError::new)
    }

    async fn rollback(&self, tx: Self::Tx) -> Result<(), StorageError> {
        tx.rollback().await.map_err(StorageError::new)
    }
}
