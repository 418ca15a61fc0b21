//! Generic entity service.
//!
//! One implementation serves both entity kinds; the kind comes from the
//! injected [`EntityStore`]. Reads and deletes are single storage calls.
//! Creation runs the duplicate check and the insert inside one transaction
//! that is committed or rolled back at a single finalization point.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::entity::{CreateRequest, EntityResponse, ParamIdRequest, ParamIdsRequest};
use crate::error::CoreError;
use crate::kind::EntityKind;
use crate::storage::EntityStore;
use crate::types::DbId;
use crate::validation::{ConstraintValidator, RequestValidator};

/// Business operations for one entity kind.
pub struct EntityService<S, V = ConstraintValidator> {
    store: S,
    validator: V,
}

impl<S, V> EntityService<S, V>
where
    S: EntityStore,
    V: RequestValidator,
{
    pub fn new(store: S, validator: V) -> Self {
        Self { store, validator }
    }

    pub fn kind(&self) -> EntityKind {
        self.store.kind()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn find_by_id(&self, request: ParamIdRequest) -> Result<EntityResponse, CoreError> {
        self.validator.validate(&request)?;
        let kind = self.kind();

        let entity = self
            .store
            .find_by_id(request.id)
            .await
            .map_err(|e| {
                CoreError::storage(format!("error finding {kind} with id {}", request.id), e)
            })?
            .ok_or(CoreError::NotFound {
                entity: kind.label(),
                id: request.id,
            })?;

        Ok(entity.into())
    }

    pub async fn find_all(&self) -> Result<Vec<EntityResponse>, CoreError> {
        let kind = self.kind();
        let entities = self
            .store
            .find_all()
            .await
            .map_err(|e| CoreError::storage(format!("error getting all {kind}s"), e))?;

        Ok(entities.into_iter().map(EntityResponse::from).collect())
    }

    pub async fn filter_by_ids(
        &self,
        request: ParamIdsRequest,
    ) -> Result<Vec<EntityResponse>, CoreError> {
        self.validator.validate(&request)?;
        let kind = self.kind();

        let entities = self
            .store
            .filter_by_ids(&request.ids)
            .await
            .map_err(|e| {
                CoreError::storage(format!("error getting {kind}s by ids {:?}", request.ids), e)
            })?;

        Ok(entities.into_iter().map(EntityResponse::from).collect())
    }

    /// Returns the number of removed rows; a missing id yields 0.
    pub async fn delete_by_id(&self, request: ParamIdRequest) -> Result<u64, CoreError> {
        self.validator.validate(&request)?;
        let kind = self.kind();

        let count = self.store.delete_by_id(request.id).await.map_err(|e| {
            CoreError::storage(format!("error deleting {kind} with id {}", request.id), e)
        })?;

        tracing::info!(%kind, id = request.id, count, "Deleted by id");
        Ok(count)
    }

    pub async fn delete_by_ids(&self, request: ParamIdsRequest) -> Result<u64, CoreError> {
        self.validator.validate(&request)?;
        let kind = self.kind();

        let count = self.store.delete_by_ids(&request.ids).await.map_err(|e| {
            CoreError::storage(format!("error deleting {kind}s by ids {:?}", request.ids), e)
        })?;

        tracing::info!(%kind, ids = ?request.ids, count, "Deleted by ids");
        Ok(count)
    }

    /// Create a new entity and return its generated id.
    ///
    /// Invalid requests fail before a transaction is opened. Once the
    /// transaction exists it is committed or rolled back exactly once, also
    /// when the body panics: the panic is converted into
    /// [`CoreError::Panicked`] and the transaction is rolled back.
    pub async fn create(&self, request: CreateRequest) -> Result<DbId, CoreError> {
        self.validator.validate(&request)?;
        let kind = self.kind();

        let mut tx = self
            .store
            .begin()
            .await
            .map_err(|e| CoreError::storage(format!("error creating {kind} transaction"), e))?;

        let outcome = AssertUnwindSafe(self.create_in_tx(&mut tx, &request))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                Err(CoreError::Panicked {
                    context: format!("creating {kind}"),
                    message: panic_message(payload.as_ref()),
                })
            });

        self.finalize(tx, outcome).await
    }

    async fn create_in_tx(&self, tx: &mut S::Tx, request: &CreateRequest) -> Result<DbId, CoreError> {
        let kind = self.kind();

        let exists = self
            .store
            .exists_by_name_tx(tx, &request.name)
            .await
            .map_err(|e| {
                CoreError::storage(format!("error finding {kind} by name {}", request.name), e)
            })?;

        if exists {
            tracing::debug!(%kind, name = %request.name, "Duplicate name rejected");
            return Err(CoreError::AlreadyExists {
                entity: kind.label(),
                name: request.name.clone(),
            });
        }

        self.store.insert_tx(tx, request).await.map_err(|e| {
            CoreError::storage(format!("error creating {kind} with name {}", request.name), e)
        })
    }

    async fn finalize(
        &self,
        tx: S::Tx,
        outcome: Result<DbId, CoreError>,
    ) -> Result<DbId, CoreError> {
        let kind = self.kind();
        let context = || format!("creating {kind}");

        match outcome {
            Ok(id) => {
                if let Err(source) = self.store.commit(tx).await {
                    tracing::error!(%kind, error = %source, "Commit failed");
                    return Err(CoreError::Commit {
                        context: context(),
                        source,
                    });
                }
                tracing::info!(%kind, id, "Entity created");
                Ok(id)
            }
            Err(cause) => match self.store.rollback(tx).await {
                Ok(()) => {
                    tracing::debug!(%kind, error = %cause, "Transaction rolled back");
                    Err(cause)
                }
                Err(source) => {
                    tracing::error!(%kind, error = %cause, rollback_error = %source, "Rollback failed");
                    Err(CoreError::Rollback {
                        context: context(),
                        cause: Box::new(cause),
                        source,
                    })
                }
            },
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
