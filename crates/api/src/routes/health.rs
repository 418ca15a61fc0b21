//! Root-level liveness endpoint.

use axum::extract::State;
use axum::{routing::get, Router};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

/// `ok` while the database answers, `degraded` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Ok,
    Degraded,
}

/// Payload carried in the `data` field of the health envelope.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: ServiceStatus,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthReport {
    fn from_db_probe(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy {
                ServiceStatus::Ok
            } else {
                ServiceStatus::Degraded
            },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

/// GET /health
///
/// Always 200: a failed ping is reported as `degraded` in the payload.
async fn health(State(state): State<AppState>) -> ApiResponse<HealthReport> {
    let db_healthy = match idm_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            false
        }
    };

    ApiResponse::ok(HealthReport::from_db_probe(db_healthy))
}

/// Mount health routes (root level, outside `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
