use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{ApiError, StoreError},
    models::focus::FocusMode,
    services::metrics,
    AppState,
};

/// Reject a focus mode with no name or no tags before it reaches the store.
fn is_valid(mode: &FocusMode) -> Result<(), ApiError> {
    if mode.name.is_empty() {
        return Err(invalid("Focus name is required"));
    }
    if mode.tags.is_empty() {
        return Err(invalid("At least one tag is required"));
    }
    Ok(())
}

fn invalid(message: &str) -> ApiError {
    ApiError::bad_request("INVALID_FOCUS_MODE", message, message)
}

/// Decode a focus mode whatever the request's Content-Type, then validate it.
fn decode(body: &Bytes) -> Result<FocusMode, ApiError> {
    let mode: FocusMode = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("rejected focus mode body: {e}");
        ApiError::bad_request("INVALID_REQUEST_BODY", "Invalid request data", e)
    })?;
    is_valid(&mode)?;
    Ok(mode)
}

fn unknown_tag(e: StoreError) -> ApiError {
    ApiError::bad_request("INVALID_FOCUS_MODE", "Unknown tag", e)
}

/// GET /focus-modes
pub async fn list_focus_modes(State(state): State<AppState>) -> Result<Json<Vec<FocusMode>>, ApiError> {
    match state.focus_modes.get_all().await {
        Ok(modes) => {
            metrics::record("list", "ok");
            Ok(Json(modes))
        }
        Err(e) => {
            metrics::record("list", "error");
            tracing::error!("failed to read focus modes: {e}");
            Err(ApiError::internal("FOCUS_READ_FAILED", "Error fetching focus modes.", e))
        }
    }
}

/// POST /focus-modes
pub async fn create_focus_mode(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<FocusMode>), ApiError> {
    let mode = decode(&body).inspect_err(|_| metrics::record("create", "rejected"))?;

    match state.focus_modes.create(&mode).await {
        Ok(created) => {
            metrics::record("create", "ok");
            tracing::info!(focus_id = created.id, "focus mode created");
            Ok((StatusCode::CREATED, Json(created)))
        }
        Err(e @ StoreError::UnknownTag(_)) => {
            metrics::record("create", "rejected");
            Err(unknown_tag(e))
        }
        Err(e) => {
            metrics::record("create", "error");
            tracing::error!("failed to create focus mode: {e}");
            Err(ApiError::internal("FOCUS_CREATE_FAILED", "Error creating focus mode", e))
        }
    }
}

/// PUT|PATCH /focus-modes — whole-record replace keyed by `focusId`.
pub async fn update_focus_mode(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FocusMode>, ApiError> {
    let mode = decode(&body).inspect_err(|_| metrics::record("update", "rejected"))?;

    match state.focus_modes.update(&mode).await {
        Ok(updated) => {
            metrics::record("update", "ok");
            Ok(Json(updated))
        }
        Err(e @ StoreError::NotFound(_)) => {
            metrics::record("update", "rejected");
            Err(ApiError::new(StatusCode::NOT_FOUND, "FOCUS_NOT_FOUND", "Focus mode not found", e))
        }
        Err(e @ StoreError::UnknownTag(_)) => {
            metrics::record("update", "rejected");
            Err(unknown_tag(e))
        }
        Err(e) => {
            metrics::record("update", "error");
            tracing::error!(focus_id = mode.id, "failed to update focus mode: {e}");
            Err(ApiError::internal("FOCUS_UPDATE_FAILED", "Error updating focus mode", e))
        }
    }
}

/// DELETE /focus-modes/{focusId}
pub async fn delete_focus_mode(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: i64 = raw_id.parse().map_err(|e| {
        metrics::record("delete", "rejected");
        ApiError::bad_request("INVALID_FOCUS_ID", "Invalid focus ID", e)
    })?;

    match state.focus_modes.delete(id).await {
        Ok(()) => {
            metrics::record("delete", "ok");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            metrics::record("delete", "error");
            tracing::error!(focus_id = id, "failed to delete focus mode: {e}");
            Err(ApiError::internal("FOCUS_DELETE_FAILED", "Error deleting focus mode", e))
        }
    }
}
