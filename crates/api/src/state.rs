use std::sync::Arc;

use idm_core::kind::EntityKind;
use idm_db::{DbPool, PgEntityService};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    pub employees: Arc<PgEntityService>,
    pub roles: Arc<PgEntityService>,
}

impl AppState {
    /// Build one service per entity kind, all sharing `pool`.
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            employees: Arc::new(idm_db::entity_service(pool.clone(), EntityKind::Employee)),
            roles: Arc::new(idm_db::entity_service(pool.clone(), EntityKind::Role)),
            pool,
            config: Arc::new(config),
        }
    }

    pub fn service(&self, kind: EntityKind) -> &PgEntityService {
        match kind {
            EntityKind::Employee => &self.employees,
            EntityKind::Role => &self.roles,
        }
    }
}
