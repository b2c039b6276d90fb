/// Health check endpoint
///
/// Verifies that the server is running, the database answers and the record
/// dispatcher is still accepting commands.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "dispatcher": "running"
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use roster_shared::db::pool::health_check as database_health;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,

    /// Dispatcher status
    pub dispatcher: String,
}

/// Health check handler
///
/// Reports `degraded` instead of failing when a dependency is down.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database_ok = database_health(&state.db).await.is_ok();
    let dispatcher_ok = !state.dispatcher.is_closed();

    if !database_ok {
        tracing::warn!("Health check: database unreachable");
    }

    Ok(Json(HealthResponse {
        status: if database_ok && dispatcher_ok {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if database_ok { "connected" } else { "disconnected" }.to_string(),
        dispatcher: if dispatcher_ok { "running" } else { "stopped" }.to_string(),
    }))
}
