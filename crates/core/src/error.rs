use crate::storage::StorageError;
use crate::types::DbId;
use crate::validation::ValidationFailure;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationFailure),

    #[error("{entity} with name {name} already exists")]
    AlreadyExists { entity: &'static str, name: String },

    #[error("{context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: StorageError,
    },

    /// A panic raised inside a transactional workflow, caught before the
    /// transaction was finalized.
    #[error("{context}: panic: {message}")]
    Panicked { context: String, message: String },

    #[error("{context}: committing transaction: {source}")]
    Commit {
        context: String,
        #[source]
        source: StorageError,
    },

    /// The workflow failed and the rollback that followed failed too.
    #[error("{context}: rolling back transaction after `{cause}`: {source}")]
    Rollback {
        context: String,
        cause: Box<CoreError>,
        #[source]
        source: StorageError,
    },
}

impl CoreError {
    pub fn storage(context: impl Into<String>, source: StorageError) -> Self {
        Self::Storage {
            context: context.into(),
            source,
        }
    }

    /// Errors caused by the caller's input rather than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::AlreadyExists { .. })
    }
}
