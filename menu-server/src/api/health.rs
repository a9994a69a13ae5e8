//! Health check endpoint

use axum::{Json, Router, extract::State, routing::get};
use shared::models::HealthStatus;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health - 数据库可用时返回 ok
pub async fn health_check(State(state): State<ServerState>) -> AppResult<Json<HealthStatus>> {
    sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Health check failed");
            AppError::new(ErrorCode::StorageUnavailable)
        })?;

    Ok(Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
