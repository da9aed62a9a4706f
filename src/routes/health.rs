use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{error::ApiError, AppState};

/// GET /health — reports whether the focus mode table is reachable.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let focus_modes: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM focus_modes")
        .fetch_one(&state.db)
        .await
        .map_err(|e| {
            tracing::warn!("health check failed: {e}");
            ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "DATABASE_UNAVAILABLE",
                "Focus mode store unreachable",
                e,
            )
        })?;

    Ok(Json(json!({
        "status": "ok",
        "db": "connected",
        "focusModes": focus_modes,
    })))
}
