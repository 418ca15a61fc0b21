//! PostgreSQL persistence for employees and roles.
//!
//! Provides pool bootstrap, embedded migrations, and [`EntityRepo`], the
//! sqlx implementation of the [`idm_core::storage::EntityStore`] port.

use std::time::Duration;

use idm_core::kind::EntityKind;
use idm_core::service::EntityService;
use idm_core::validation::ConstraintValidator;
use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub use repositories::EntityRepo;

pub type DbPool = sqlx::PgPool;

/// Entity service wired to PostgreSQL.
pub type PgEntityService = EntityService<EntityRepo, ConstraintValidator>;

/// Connection pool sizing.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    /// Connections kept open while idle.
    pub min_connections: u32,
    pub max_lifetime: Duration,
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 20,
            min_connections: 5,
            max_lifetime: Duration::from_secs(60),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, config: &PoolConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .max_lifetime(config.max_lifetime)
        .idle_timeout(config.idle_timeout)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Build the service for `kind` on top of the shared pool.
pub fn entity_service(pool: DbPool, kind: EntityKind) -> PgEntityService {
    EntityService::new(EntityRepo::new(pool, kind), ConstraintValidator)
}
